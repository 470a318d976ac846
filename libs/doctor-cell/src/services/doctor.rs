use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use tracing::debug;

use shared_models::profile::{UserProfile, UserRole};

use crate::models::{Doctor, DoctorError};

/// Read-only directory of practitioners shown on the booking pages.
#[derive(Debug, Clone, Default)]
pub struct DoctorService {
    doctors: HashMap<String, Doctor>,
}

impl DoctorService {
    pub fn new(doctors: impl IntoIterator<Item = Doctor>) -> Self {
        Self {
            doctors: doctors.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Directory holding the clinic's single practitioner.
    pub fn with_sample_data() -> Self {
        Self::new([sample_doctor()])
    }

    pub fn get_doctor(&self, doctor_id: &str) -> Result<&Doctor, DoctorError> {
        debug!("Looking up doctor: {}", doctor_id);

        self.doctors
            .get(doctor_id)
            .ok_or_else(|| DoctorError::NotFound(doctor_id.to_string()))
    }

    /// Like `get_doctor`, but refuses practitioners who are not taking bookings.
    pub fn bookable_doctor(&self, doctor_id: &str) -> Result<&Doctor, DoctorError> {
        let doctor = self.get_doctor(doctor_id)?;
        if !doctor.is_active {
            return Err(DoctorError::Inactive(doctor_id.to_string()));
        }
        Ok(doctor)
    }
}

pub fn sample_doctor() -> Doctor {
    let joined = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let updated = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();

    Doctor {
        id: "doc-1".to_string(),
        user_id: "user-doc-1".to_string(),
        specialization: "Dermatology".to_string(),
        license_number: "MD-12345".to_string(),
        experience: 12,
        education: "MBBS, MD Dermatology from Aga Khan University".to_string(),
        clinic_address: "Suite 201, Medical Complex, Main Shahrah-e-Faisal, Karachi".to_string(),
        consultation_fee: 3000,
        bio: Some(
            "Specialized in medical and cosmetic dermatology with over 12 years of experience."
                .to_string(),
        ),
        profile_image: Some(
            "https://images.pexels.com/photos/5327921/pexels-photo-5327921.jpeg?auto=compress&cs=tinysrgb&w=600"
                .to_string(),
        ),
        is_active: true,
        user: UserProfile {
            id: "user-doc-1".to_string(),
            email: "dr.ayesha@clinic.com".to_string(),
            first_name: "Dr. Ayesha".to_string(),
            last_name: "Khan".to_string(),
            phone: Some("+92 321 1234567".to_string()),
            role: UserRole::Doctor,
            created_at: joined,
            updated_at: updated,
        },
    }
}
