//! REST paths, relative to the API base URL.

// Accounts
pub const LOGIN: &str = "accounts/token/";
pub const REGISTER: &str = "accounts/register/";
pub const PENDING_USERS: &str = "accounts/users/pending/";

// Patients & visits
pub const PATIENT_REGISTER: &str = "clinical/patient/register/";
pub const PATIENT_FLAT_LIST: &str = "clinical/patient/flat-list/";
pub const VISIT_LIST: &str = "clinical/patient/visit/";
pub const VISIT_CREATE: &str = "clinical/patient/visit/create/";
pub const VISITS_TODAY: &str = "clinical/patient/visits/today/";
pub const DASHBOARD_STATS: &str = "clinical/dashboard/stats/";
pub const APPOINTMENT_LIST: &str = "clinical/appointments/";

// Case history & test reports
pub const CASE_HISTORY_CREATE: &str = "clinical/case-history/create/";
pub const TEST_FILE_UPLOAD: &str = "clinical/test-upload/create/";

// Referral doctors
pub const REFERRAL_DOCTORS: &str = "clinical/doctor/flat-list/";
pub const PATIENT_REFERRALS: &str = "clinical/doctor/referrals/";

// Trials
pub const TRIAL_LIST: &str = "clinical/trials/";
pub const TRIAL_ACTIVE_LIST: &str = "clinical/trials/active/";
pub const TRIAL_CREATE: &str = "clinical/trials/create/";
pub const TRIAL_AWAITING_STOCK: &str = "clinical/trials/awaiting-stock/";

// Inventory
pub const INVENTORY_ITEMS: &str = "clinical/inventory/items/";
pub const INVENTORY_ITEM_CREATE: &str = "clinical/inventory-item/create/";
pub const INVENTORY_SERIAL_LIST: &str = "clinical/inventory/serial/list/";
pub const INVENTORY_STOCK_ADD: &str = "clinical/inventory/serial/create/";
pub const INVENTORY_PENDING: &str = "clinical/inventory/items/pending/";
pub const INVENTORY_CATALOG: &str = "clinical/inventory-item/list/";
pub const INVENTORY_BRAND_CREATE: &str = "clinical/inventory/brand/create/";
pub const INVENTORY_MODEL_CREATE: &str = "clinical/inventory/model/create/";
pub const INVENTORY_TRANSFER_HISTORY: &str = "clinical/inventory/transfer/history/";

// Billing
pub const BILLS_PAID: &str = "clinical/bills/paid/";
pub const BILLS_DUE: &str = "clinical/bills/due/";

// Follow-ups
pub const FOLLOWUP_LIST: &str = "clinical/followups/";

pub fn user_approve(id: i64) -> String {
    format!("accounts/users/{id}/approve/")
}

pub fn user_reject(id: i64) -> String {
    format!("accounts/users/{id}/reject/")
}

pub fn patient(id: i64) -> String {
    format!("clinical/patient/{id}/")
}

pub fn patient_update(id: i64) -> String {
    format!("clinical/patient/{id}/update/")
}

pub fn patient_visits(id: i64) -> String {
    format!("clinical/patient/{id}/visits/")
}

pub fn patient_purchases(id: i64) -> String {
    format!("clinical/patient/{id}/purchases/")
}

pub fn patient_service_visits(id: i64) -> String {
    format!("clinical/patient/{id}/service-visits/")
}

pub fn visit_detail(id: i64) -> String {
    format!("clinical/patient/visit/{id}/")
}

pub fn visit_update(id: i64) -> String {
    format!("clinical/patient/visit/{id}/update/")
}

pub fn visit_mark_contacted(id: i64) -> String {
    format!("clinical/patient/visit/{id}/mark-contacted/")
}

pub fn case_history(visit_id: i64) -> String {
    format!("clinical/case-history/{visit_id}/")
}

pub fn test_files(visit_id: i64) -> String {
    format!("clinical/test-upload/visit/{visit_id}/")
}

pub fn test_file_delete(id: i64) -> String {
    format!("clinical/test-upload/{id}/delete/")
}

pub fn trial_complete(id: i64) -> String {
    format!("clinical/trials/{id}/complete/")
}

pub fn trial_allocate_serial(id: i64) -> String {
    format!("clinical/trials/{id}/allocate-serial/")
}

pub fn inventory_item_update(id: i64) -> String {
    format!("clinical/inventory-item/{id}/update/")
}

pub fn inventory_item_approve(id: i64) -> String {
    format!("clinical/inventory/item/{id}/approve/")
}

pub fn bill_for_visit(visit_id: i64) -> String {
    format!("clinical/bill/visit/{visit_id}/")
}

pub fn bill_mark_paid(bill_id: i64) -> String {
    format!("clinical/bill/{bill_id}/mark-paid/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_completion_path() {
        assert_eq!(trial_complete(42), "clinical/trials/42/complete/");
    }

    #[test]
    fn id_paths_embed_the_id() {
        assert_eq!(user_reject(9), "accounts/users/9/reject/");
        assert_eq!(case_history(31), "clinical/case-history/31/");
        assert_eq!(test_file_delete(4), "clinical/test-upload/4/delete/");
    }

    #[test]
    fn all_paths_are_relative_with_trailing_slash() {
        for path in [
            LOGIN,
            REGISTER,
            PATIENT_REGISTER,
            VISIT_CREATE,
            TRIAL_ACTIVE_LIST,
            INVENTORY_SERIAL_LIST,
            BILLS_DUE,
            FOLLOWUP_LIST,
            PENDING_USERS,
            APPOINTMENT_LIST,
            CASE_HISTORY_CREATE,
            TEST_FILE_UPLOAD,
            REFERRAL_DOCTORS,
            PATIENT_REFERRALS,
            INVENTORY_CATALOG,
            INVENTORY_BRAND_CREATE,
            INVENTORY_MODEL_CREATE,
            INVENTORY_TRANSFER_HISTORY,
        ] {
            assert!(!path.starts_with('/'), "{path}");
            assert!(path.ends_with('/'), "{path}");
        }
    }
}
