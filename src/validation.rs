//! Client-side form checks, run before any request is sent.
//!
//! Each `validate_*` function mirrors one registration/entry form and
//! reports every failing field at once so the caller can show the
//! messages inline.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ClientError, FieldErrors};
use crate::models::{
    LoginRequest, NewCaseHistory, NewInventoryItem, NewPatient, NewTrial, NewVisit, Payment,
    ReferralType, Registration, StockEntry, TestReportFile,
};

const REQUIRED: &str = "This is a required field";

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Minimum password length accepted by the accounts backend.
const MIN_PASSWORD_LEN: usize = 6;

/// Accumulates field errors for one form.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text must be non-blank.
    pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, message);
        }
        self
    }

    /// Value must be chosen.
    pub fn present<T>(&mut self, field: &str, value: &Option<T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.errors.add(field, message);
        }
        self
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.add(field, message);
        }
        self
    }

    pub fn phone(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, "Phone is required");
        } else if !PHONE.is_match(value.trim()) {
            self.errors.add(field, "Enter valid 10-digit number");
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, "Email is required");
        } else if !EMAIL.is_match(value.trim()) {
            self.errors.add(field, "Invalid email format");
        }
        self
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn finish(self) -> Result<(), ClientError> {
        self.errors.into_result()
    }
}

pub fn validate_login(form: &LoginRequest) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.email("email", &form.email)
        .required("password", &form.password, "Password is required")
        .check(
            "password",
            form.password.chars().count() >= MIN_PASSWORD_LEN,
            "Password must be at least 6 characters",
        )
        .present("clinic_id", &form.clinic_id, "Clinic is required");
    v.finish()
}

pub fn validate_registration(form: &Registration) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.required("full_name", &form.full_name, "Full name is required")
        .email("email", &form.email)
        .required("password", &form.password, "Password is required")
        .check(
            "password",
            form.password.chars().count() >= MIN_PASSWORD_LEN,
            "Password must be at least 6 characters",
        )
        .required(
            "confirm_password",
            &form.confirm_password,
            "Confirm password is required",
        )
        .check(
            "confirm_password",
            form.confirm_password == form.password,
            "Passwords must match",
        )
        .phone("phone", &form.phone)
        .present("clinic_id", &form.clinic_id, "Clinic is required")
        .present("role_id", &form.role_id, "Role is required");
    v.finish()
}

pub fn validate_new_patient(form: &NewPatient) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.required("name", &form.name, "Name is required")
        .present("age", &form.age, "Age is required")
        .required("gender", &form.gender, "Gender is required")
        .phone("phone_primary", &form.phone_primary)
        .required("city", &form.city, "City is required")
        .required("address", &form.address, "Address is required")
        .present("referral_type", &form.referral_type, "Referral type is required")
        .present("service_type", &form.service_type, "Service type is required")
        .present(
            "appointment_date",
            &form.appointment_date,
            "Appointment date is required",
        );

    if form.referral_type == Some(ReferralType::Doctor) {
        let doctor = form.referral_doctor.as_deref().unwrap_or_default();
        v.required("referral_doctor", doctor, "Doctor name is required");
    }

    if let Some(secondary) = form.phone_secondary.as_deref() {
        if !secondary.trim().is_empty() {
            v.phone("phone_secondary", secondary);
        }
    }

    v.check(
        "visit_details",
        !form.visit_details.is_empty(),
        "At least one visit detail is required",
    );
    for (i, detail) in form.visit_details.iter().enumerate() {
        v.required(
            &format!("visit_details[{i}].visit_type"),
            &detail.visit_type,
            "Visit type is required",
        );
    }
    v.finish()
}

pub fn validate_new_visit(form: &NewVisit) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.present("service_type", &form.service_type, "Service type is required")
        .present(
            "appointment_date",
            &form.appointment_date,
            "Appointment date is required",
        );
    v.finish()
}

pub fn validate_new_trial(form: &NewTrial) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.required("serial_number", &form.serial_number, "Serial number is required")
        .required("receiver_size", &form.receiver_size, "Receiver size is required")
        .required("ear_fitted", &form.ear_fitted, "Ear fitted is required")
        .required("dome_type", &form.dome_type, "Dome type is required")
        .required("srt_before", &form.srt_before, "SRT before is required")
        .required("sds_before", &form.sds_before, "SDS before is required")
        .required("ucl_before", &form.ucl_before, "UCL before is required")
        .required("gain_settings", &form.gain_settings, "Gain settings required")
        .required("patient_response", &form.patient_response, "Patient response required")
        .required(
            "counselling_notes",
            &form.counselling_notes,
            "Counselling notes required",
        )
        .present("cost", &form.cost, "Cost is required")
        .present("trial_start_date", &form.trial_start_date, "Start date required")
        .present("trial_end_date", &form.trial_end_date, "End date required");

    if let Some(discount) = form.discount_offered {
        v.check(
            "discount_offered",
            (0.0..=100.0).contains(&discount),
            "Discount cannot exceed 100",
        );
    }
    if let (Some(start), Some(end)) = (form.trial_start_date, form.trial_end_date) {
        v.check(
            "trial_end_date",
            end >= start,
            "End date must be after start date",
        );
    }
    v.finish()
}

pub fn validate_case_history(form: &NewCaseHistory) -> Result<(), ClientError> {
    let notes = &form.notes;
    let mut v = Validator::new();
    v.required("medical_history", &notes.medical_history, REQUIRED)
        .required("family_history", &notes.family_history, REQUIRED)
        .required("noise_exposure", &notes.noise_exposure, REQUIRED)
        .required("previous_ha_experience", &notes.previous_ha_experience, REQUIRED)
        .check(
            "test_requested",
            form.test_requested.iter().any(|t| !t.trim().is_empty()),
            "Select at least one test",
        );
    v.finish()
}

pub fn validate_test_report(file: &TestReportFile) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.required("file_type", &file.file_type, "Please select test type and file")
        .required("file", &file.file_name, "Please select test type and file")
        .check("file", !file.bytes.is_empty(), "File is empty");
    v.finish()
}

pub fn validate_new_inventory_item(form: &NewInventoryItem) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.required("product_name", &form.product_name, REQUIRED)
        .required("brand", &form.brand, REQUIRED)
        .required("model_type", &form.model_type, REQUIRED)
        .required("category", &form.category, REQUIRED)
        .present("stock_type", &form.stock_type, REQUIRED)
        .present("unit_price", &form.unit_price, REQUIRED);
    if let Some(price) = form.unit_price {
        v.check("unit_price", price >= 0.0, "Please enter a valid input value");
    }
    v.finish()
}

pub fn validate_stock_entry(entry: &StockEntry) -> Result<(), ClientError> {
    let mut v = Validator::new();
    match entry {
        StockEntry::Serialized { serial_numbers, .. } => {
            v.check(
                "serial_numbers",
                !serial_numbers.is_empty(),
                "At least one serial number is required",
            );
            v.check(
                "serial_numbers",
                serial_numbers.iter().all(|s| !s.trim().is_empty()),
                "Serial numbers cannot be blank",
            );
            let mut seen = std::collections::HashSet::new();
            v.check(
                "serial_numbers",
                serial_numbers.iter().all(|s| seen.insert(s.trim())),
                "Serial numbers must be unique",
            );
        }
        StockEntry::Quantity { quantity, .. } => {
            v.check("quantity", *quantity > 0, "Quantity must be at least 1");
        }
    }
    v.finish()
}

pub fn validate_payment(payment: &Payment) -> Result<(), ClientError> {
    let mut v = Validator::new();
    v.check(
        "amount",
        payment.amount.is_finite() && payment.amount > 0.0,
        "Amount must be greater than zero",
    );
    v.finish()
}
