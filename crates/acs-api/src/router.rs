//! Router configuration and server setup.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Creates the router: API routes first, static files for everything else.
pub fn create_router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/eventos", get(handlers::list_attendance))
        .route("/api/hik-users", get(handlers::list_users))
        .route(
            "/api/schedules",
            get(handlers::get_schedules).post(handlers::save_schedules),
        )
        .route(
            "/api/employees",
            get(handlers::get_employees).post(handlers::save_employees),
        )
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.listen_addr` and serves until Ctrl-C.
pub async fn serve(config: ServerConfig, state: AppState) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(
        addr = %listener.local_addr()?,
        public_dir = %config.public_dir.display(),
        "server listening"
    );
    axum::serve(listener, create_router(state, &config.public_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use acs_core::SequentialSearchIds;
    use acs_device::wire::EVENTS_PATH;
    use acs_device::{DeviceError, DeviceTransport, EventPaginator, UserDirectoryFetcher};
    use acs_store::ConfigStore;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    /// Answers event searches and user searches with fixed bodies.
    struct StubDevice {
        events: Value,
        users: Value,
        failure: Option<u16>,
        calls: AtomicUsize,
    }

    impl StubDevice {
        fn new(events: Value, users: Value) -> Self {
            Self {
                events,
                users,
                failure: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                failure: Some(status),
                ..Self::new(json!({}), json!({}))
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DeviceTransport for StubDevice {
        async fn send(&self, path: &str, _payload: &Value) -> Result<Value, DeviceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(status) = self.failure {
                return Err(DeviceError::Status {
                    status,
                    message: "Device Busy".to_string(),
                });
            }
            if path == EVENTS_PATH {
                Ok(self.events.clone())
            } else {
                Ok(self.users.clone())
            }
        }
    }

    struct Harness {
        server: TestServer,
        device: Arc<StubDevice>,
        dir: TempDir,
    }

    fn harness(device: StubDevice) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let device = Arc::new(device);
        let search_ids = Arc::new(SequentialSearchIds::new());
        let state = AppState::new(
            EventPaginator::new(device.clone(), search_ids.clone(), "-04:00".parse().unwrap()),
            UserDirectoryFetcher::new(device.clone(), search_ids),
            ConfigStore::open(dir.path().join("data")).unwrap(),
        );
        let public_dir = dir.path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), "<h1>Asistencia</h1>").unwrap();

        let server = TestServer::new(create_router(state, &public_dir)).unwrap();
        Harness { server, device, dir }
    }

    fn default_harness() -> Harness {
        harness(StubDevice::new(
            json!({"AcsEvent": {"responseStatusStrg": "OK", "InfoList": [
                {"major": 5, "minor": 167, "time": "2025-03-03T17:30:12-04:00",
                 "employeeNoString": "12", "name": "Marta Díaz", "serialNo": 2},
                {"major": 5, "minor": 38, "time": "2025-03-03T08:01:44-04:00",
                 "employeeNoString": "12", "name": "Marta Díaz", "serialNo": 1},
                {"major": 5, "minor": 21, "time": "2025-03-03T09:00:00-04:00",
                 "employeeNoString": "12", "name": "Marta Díaz", "serialNo": 3}
            ]}}),
            json!({"UserInfoSearch": {"UserInfo": [
                {"employeeNo": "12", "name": "Marta Díaz"},
                {"employeeNo": "15", "name": "Pedro Soto"}
            ]}}),
        ))
    }

    #[tokio::test]
    async fn eventos_returns_normalized_attendance() {
        let h = default_harness();

        let response = h
            .server
            .get("/api/eventos")
            .add_query_param("start", "2025-03-03")
            .add_query_param("end", "2025-03-03")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(
            body,
            json!([
                {"fecha": "2025-03-03", "hora": "08:01:44", "id": "12",
                 "nombre": "Marta Díaz", "metodo": "Huella/Tarjeta"},
                {"fecha": "2025-03-03", "hora": "17:30:12", "id": "12",
                 "nombre": "Marta Díaz", "metodo": "Rostro"}
            ])
        );
        assert_eq!(h.device.calls(), 1);
    }

    #[tokio::test]
    async fn eventos_without_end_is_bad_request() {
        let h = default_harness();

        let response = h.server.get("/api/eventos?start=2025-03-03").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["error"], "missing required parameter: end");
        assert_eq!(h.device.calls(), 0);
    }

    #[tokio::test]
    async fn eventos_with_malformed_date_is_bad_request() {
        let h = default_harness();

        let response = h.server.get("/api/eventos?start=03/01/2025&end=2025-03-31").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(h.device.calls(), 0);
    }

    #[tokio::test]
    async fn eventos_with_inverted_range_is_bad_request() {
        let h = default_harness();

        let response = h.server.get("/api/eventos?start=2025-03-31&end=2025-03-01").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(h.device.calls(), 0);
    }

    #[tokio::test]
    async fn device_failure_is_bad_gateway() {
        let h = harness(StubDevice::failing(503));

        let response = h.server.get("/api/eventos?start=2025-03-01&end=2025-03-02").await;
        response.assert_status(StatusCode::BAD_GATEWAY);

        let body: Value = response.json();
        assert_eq!(body["error"], "device returned HTTP 503: Device Busy");
    }

    #[tokio::test]
    async fn hik_users_lists_directory() {
        let h = default_harness();

        let response = h.server.get("/api/hik-users").await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!([
                {"id": "12", "name": "Marta Díaz"},
                {"id": "15", "name": "Pedro Soto"}
            ])
        );
    }

    #[tokio::test]
    async fn hik_users_device_failure_is_bad_gateway() {
        let h = harness(StubDevice::failing(401));
        h.server
            .get("/api/hik-users")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unsaved_documents_read_as_empty_lists() {
        let h = default_harness();

        for path in ["/api/schedules", "/api/employees"] {
            let response = h.server.get(path).await;
            response.assert_status_ok();
            assert_eq!(response.json::<Value>(), json!([]));
        }
    }

    #[tokio::test]
    async fn saved_schedules_are_returned_and_persisted() {
        let h = default_harness();
        let schedules = json!([{"name": "Turno mañana", "entrada": "08:00", "salida": "16:00"}]);

        let response = h.server.post("/api/schedules").json(&schedules).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"success": true}));

        assert_eq!(h.server.get("/api/schedules").await.json::<Value>(), schedules);
        assert_eq!(h.server.get("/api/employees").await.json::<Value>(), json!([]));
        assert!(h.dir.path().join("data").join("schedules.json").is_file());
    }

    #[tokio::test]
    async fn saving_employees_replaces_previous_document() {
        let h = default_harness();

        h.server
            .post("/api/employees")
            .json(&json!([{"id": "12"}, {"id": "15"}]))
            .await
            .assert_status_ok();
        h.server
            .post("/api/employees")
            .json(&json!([{"id": "15", "horario": "Turno mañana"}]))
            .await
            .assert_status_ok();

        assert_eq!(
            h.server.get("/api/employees").await.json::<Value>(),
            json!([{"id": "15", "horario": "Turno mañana"}])
        );
    }

    #[tokio::test]
    async fn other_paths_serve_static_files() {
        let h = default_harness();

        let response = h.server.get("/index.html").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "<h1>Asistencia</h1>");

        h.server
            .get("/missing.js")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
