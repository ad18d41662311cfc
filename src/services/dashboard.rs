use crate::error::ClientError;
use crate::models::{DashboardStats, Envelope};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};

pub fn stats(transport: &dyn Transport) -> Result<DashboardStats, ClientError> {
    let envelope: Envelope<DashboardStats> =
        send_json(transport, ApiRequest::get(routes::DASHBOARD_STATS))?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, MockTransport};
    use serde_json::json;

    #[test]
    fn missing_counters_default_to_zero() {
        let mock = MockTransport::new().respond(
            Method::Get,
            routes::DASHBOARD_STATS,
            json!({"status": 200, "data": {"total_patients": 120, "today_visits": 9}}),
        );
        let stats = stats(&mock).unwrap();
        assert_eq!(stats.total_patients, 120);
        assert_eq!(stats.active_trials, 0);
    }
}
