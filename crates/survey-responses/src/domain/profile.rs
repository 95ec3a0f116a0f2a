//! Respondent identity and work profile.

use serde::{Deserialize, Serialize};
use survey_core::error::DomainError;

/// Identity, demographic and work fields collected once per session and
/// copied into every round the respondent submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentProfile {
    /// Full name; letters only.
    pub name: String,
    /// Employing company.
    pub affiliation: String,
    /// Job category (driver, controller, ...).
    pub job: String,
    /// Years of service; digits only.
    pub years: String,
    /// Employee number.
    pub employee_id: String,
    /// Grade or rank.
    pub position: String,
    /// Department.
    pub department: String,
    /// Gender.
    pub gender: String,
    /// Date of birth.
    pub date_of_birth: String,
    /// Office telephone number.
    pub office_phone: String,
    /// Company e-mail address.
    pub company_email: String,
    /// Railway certifications held.
    pub railroad_certification: String,
    /// Job training completed.
    pub job_education: String,
    /// Date of the latest health check.
    pub health_check_date: String,
    /// Body temperature at the health check.
    pub body_temperature: String,
    /// Systolic blood pressure at the health check.
    pub systolic_bp: String,
    /// Diastolic blood pressure at the health check.
    pub diastolic_bp: String,
    /// Pulse at the health check.
    pub pulse: String,
    /// Work pattern.
    pub work_type: String,
    /// Shift start and end.
    pub work_time: String,
    /// Serial number of the staff access card.
    pub employee_card_number: String,
}

impl RespondentProfile {
    /// Fields in the order they are validated.
    fn fields(&self) -> [(&'static str, &str); 21] {
        [
            ("name", self.name.as_str()),
            ("affiliation", self.affiliation.as_str()),
            ("years", self.years.as_str()),
            ("job", self.job.as_str()),
            ("employee_id", self.employee_id.as_str()),
            ("position", self.position.as_str()),
            ("department", self.department.as_str()),
            ("gender", self.gender.as_str()),
            ("date_of_birth", self.date_of_birth.as_str()),
            ("office_phone", self.office_phone.as_str()),
            ("company_email", self.company_email.as_str()),
            ("railroad_certification", self.railroad_certification.as_str()),
            ("job_education", self.job_education.as_str()),
            ("health_check_date", self.health_check_date.as_str()),
            ("body_temperature", self.body_temperature.as_str()),
            ("systolic_bp", self.systolic_bp.as_str()),
            ("diastolic_bp", self.diastolic_bp.as_str()),
            ("pulse", self.pulse.as_str()),
            ("work_type", self.work_type.as_str()),
            ("work_time", self.work_time.as_str()),
            ("employee_card_number", self.employee_card_number.as_str()),
        ]
    }

    /// Validates the profile, reporting the first offending field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a field is blank, the name holds
    /// anything but letters, or the years of service are not digits.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in self.fields() {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{field} is required")));
            }
            match field {
                "name" if !value.chars().all(char::is_alphabetic) => {
                    return Err(DomainError::Validation(
                        "name must contain letters only".to_owned(),
                    ));
                }
                "years" if !value.chars().all(|c| c.is_ascii_digit()) => {
                    return Err(DomainError::Validation(
                        "years must contain digits only".to_owned(),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Years of service as a number; `0` if unparsable.
    #[must_use]
    pub fn years_of_service(&self) -> u32 {
        self.years.parse().unwrap_or(0)
    }
}
