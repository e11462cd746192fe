use appointment_book::booking::{InMemoryStore, TenantId};
use appointment_book::config::TenantSettings;

/// The tenant every fixture row belongs to. Tenant 2 only exists to prove
/// that its rows stay invisible.
pub const TENANT: TenantId = TenantId::new(1);

/// A small salon on a Tuesday (2026-03-17): two employees with an id, one
/// legacy appointment that only stored the employee label, one doctor, one
/// cancellation, and one row of a second tenant.
#[must_use]
pub fn salon_store() -> InMemoryStore {
    InMemoryStore::from_json_str(concat!(
        "{\n",
        "  \"employees\": [\n",
        "    { \"id\": 5, \"label\": \"Dana Weber\" },\n",
        "    { \"id\": 6, \"label\": \"Mia Brandt\" }\n",
        "  ],\n",
        "  \"appointments\": [\n",
        "    {\n",
        "      \"id\": 1, \"tenant\": 1, \"date\": \"2026-03-17\", \"time\": \"09:00\",\n",
        "      \"duration\": 90, \"status\": \"confirmed\", \"employee_id\": 5,\n",
        "      \"client_id\": 9, \"client_name\": \"Anna Schmidt\",\n",
        "      \"service_name\": \"Haircut\"\n",
        "    },\n",
        "    {\n",
        "      \"id\": 2, \"tenant\": 1, \"date\": \"2026-03-17\", \"time\": \"11:00\",\n",
        "      \"duration\": 60, \"status\": \"confirmed\", \"doctor_id\": 2,\n",
        "      \"client_id\": 10, \"service_name\": \"Consultation\"\n",
        "    },\n",
        "    {\n",
        "      \"id\": 3, \"tenant\": 1, \"date\": \"2026-03-17\", \"time\": \"14:00\",\n",
        "      \"duration\": 60, \"status\": \"cancelled\", \"employee_id\": 5\n",
        "    },\n",
        "    {\n",
        "      \"id\": 4, \"tenant\": 1, \"date\": \"2026-03-17\", \"time\": \"16:00\",\n",
        "      \"duration\": 30, \"status\": \"confirmed\", \"employee_label\": \"Dana Weber\"\n",
        "    },\n",
        "    {\n",
        "      \"id\": 5, \"tenant\": 2, \"date\": \"2026-03-17\", \"time\": \"09:30\",\n",
        "      \"duration\": 60, \"status\": \"confirmed\", \"employee_id\": 5\n",
        "    }\n",
        "  ]\n",
        "}"
    ))
    .expect("the salon seed should parse")
}

/// Short business hours, for tests that want the window to matter.
#[allow(dead_code)]
#[must_use]
pub fn morning_settings() -> TenantSettings {
    TenantSettings::from_toml_str(concat!(
        //
        "work_start = \"08:00\"\n",
        "work_end = \"12:00\"\n",
    ))
    .expect("settings should parse")
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
