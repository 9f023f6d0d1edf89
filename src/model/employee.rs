use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "John",
        "last_name": "Doe",
        "gender": "Male",
        "birth": "1990-04-15",
        "address": "12 Harbor Lane",
        "phone": "555-0134",
        "email": "john.doe@example.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Store-assigned, immutable after creation.
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "Male")]
    pub gender: String,

    #[schema(example = "1990-04-15", value_type = String, format = "date")]
    pub birth: NaiveDate,

    #[schema(example = "12 Harbor Lane")]
    pub address: String,

    #[schema(example = "555-0134")]
    pub phone: String,

    #[schema(example = "john.doe@example.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

/// Form payload for Create/Edit. The field set is the binding allow-list:
/// anything else in the request body is dropped at deserialization, so
/// over-posted fields never reach the store.
///
/// `birth` stays a raw string here so a bad date can be reported back with
/// the rest of the submitted values instead of failing the whole extraction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeForm {
    /// Ignored on Create (the store assigns it); required to match the path
    /// id on Edit.
    pub id: Option<i32>,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "Male")]
    pub gender: String,
    #[schema(example = "1990-04-15")]
    pub birth: String,
    #[schema(example = "12 Harbor Lane")]
    pub address: String,
    #[schema(example = "555-0134")]
    pub phone: String,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "birth")]
    pub field: &'static str,
    #[schema(example = "not a valid date, expected YYYY-MM-DD")]
    pub message: String,
}

impl EmployeeForm {
    /// Model validation. The fields are free-form text by design; the only
    /// typed field is the birth date.
    pub fn validate(&self) -> Result<NaiveDate, Vec<FieldError>> {
        match NaiveDate::parse_from_str(self.birth.trim(), "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => Err(vec![FieldError {
                field: "birth",
                message: format!("'{}' is not a valid date, expected YYYY-MM-DD", self.birth),
            }]),
        }
    }

    /// Materialize the row that will be written, with the authoritative id
    /// and the parsed birth date.
    pub fn into_employee(self, id: i32, birth: NaiveDate) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            birth,
            address: self.address,
            phone: self.phone,
            email: self.email,
            department: self.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EmployeeForm {
        EmployeeForm {
            id: None,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            gender: "Female".into(),
            birth: "1988-02-29".into(),
            address: "4 Elm St".into(),
            phone: "555-0199".into(),
            email: "ann@example.com".into(),
            department: "Sales".into(),
        }
    }

    #[test]
    fn valid_birth_date_parses() {
        let birth = form().validate().unwrap();
        assert_eq!(birth, NaiveDate::from_ymd_opt(1988, 2, 29).unwrap());
    }

    #[test]
    fn bad_birth_date_is_reported_against_the_birth_field() {
        let mut bad = form();
        bad.birth = "29/02/1988".into();
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "birth");
    }

    #[test]
    fn into_employee_carries_every_allow_listed_field() {
        let f = form();
        let birth = f.validate().unwrap();
        let employee = f.clone().into_employee(7, birth);
        assert_eq!(employee.id, 7);
        assert_eq!(employee.first_name, f.first_name);
        assert_eq!(employee.department, f.department);
        assert_eq!(employee.birth, birth);
    }

    #[test]
    fn unknown_form_fields_are_dropped_at_deserialization() {
        let body = "first_name=Ann&last_name=Lee&gender=F&birth=1988-02-29\
                    &address=4+Elm+St&phone=555&email=a%40b.c&department=Sales\
                    &is_admin=true";
        let parsed: EmployeeForm = serde_urlencoded::from_str(body).unwrap();
        assert_eq!(parsed.first_name, "Ann");
        assert_eq!(parsed.id, None);
    }
}
