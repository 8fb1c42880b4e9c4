#[cfg(test)]
mod integration_tests {
    use axum::http::StatusCode;
    use common::WidgetKind;
    use compute::cache::DurableStorage;
    use compute::presenter::WidgetState;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::cli::commands::{clear_cache, load_widget_state};
    use crate::file_storage::FileStorage;
    use crate::test_utils::test_utils::{Reply, spawn_backend, test_config};

    fn generation_body() -> Value {
        json!([
            { "fecha": "2024-03-02T00:00:00", "TERMICA": 120.5, "COGENERADOR": 10, "HIDRAULICA": 300, "SOLAR": 80, "EOLICA": 45 },
            { "fecha": "2024-03-01T00:00:00", "TERMICA": 118, "COGENERADOR": null, "HIDRAULICA": 310, "SOLAR": 75, "EOLICA": 40 },
            { "fecha": "2024-03-03T00:00:00", "TERMICA": 121, "COGENERADOR": 9, "HIDRAULICA": 305, "SOLAR": 82, "EOLICA": 50 }
        ])
    }

    fn capacity_body() -> Value {
        json!([
            { "tipo_proyecto_fuente": "SOLAR", "capacidad_acumulada": 10, "numero_proyectos": 1 },
            { "tipo_proyecto_fuente": "EOLICA", "capacidad_acumulada": 40, "numero_proyectos": 2 },
            { "tipo_proyecto_fuente": "SOLAR", "capacidad_acumulada": 15, "numero_proyectos": 3 }
        ])
    }

    fn expect_ready(state: WidgetState) -> (common::ChartConfig, bool) {
        match state {
            WidgetState::Ready { config, from_cache } => (config, from_cache),
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generation_chart_is_served_from_cache_on_next_run() {
        let backend = spawn_backend(Reply::ok(generation_body()), Reply::ok(capacity_body())).await;
        let dir = TempDir::new().unwrap();
        let config = test_config(backend.base_url(), &dir);

        let (first, from_cache) =
            expect_ready(load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap());
        assert!(!from_cache);
        assert_eq!(first.categories(), ["2024-03-01", "2024-03-02", "2024-03-03"]);
        let cogenerador = first.series_named("COGENERADOR").unwrap();
        assert_eq!(cogenerador.data, vec![0.0, 10.0, 9.0]);

        // A second run starts with an empty volatile tier and reads the file
        let (second, from_cache) =
            expect_ready(load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap());
        assert!(from_cache);
        assert_eq!(second, first);
        assert_eq!(backend.generation_hits(), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_is_refetched() {
        let backend = spawn_backend(Reply::ok(generation_body()), Reply::ok(capacity_body())).await;
        let dir = TempDir::new().unwrap();
        let mut config = test_config(backend.base_url(), &dir);
        config.cache_expiration_ms = 0;

        load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let (_, from_cache) =
            expect_ready(load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap());

        assert!(!from_cache);
        assert_eq!(backend.generation_hits(), 2);
    }

    #[tokio::test]
    async fn test_http_500_shows_generation_error() {
        let backend = spawn_backend(
            Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
            Reply::ok(capacity_body()),
        )
        .await;
        let dir = TempDir::new().unwrap();
        let config = test_config(backend.base_url(), &dir);

        let state = load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap();

        assert_eq!(
            state,
            WidgetState::Error {
                message: "No se pudo cargar la gráfica de generación diaria".to_string()
            }
        );
        let storage = FileStorage::open(config.cache_file(), config.cache_quota_bytes).unwrap();
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_body_shows_capacity_error() {
        let backend = spawn_backend(
            Reply::ok(generation_body()),
            Reply::ok(json!({ "error": "unexpected" })),
        )
        .await;
        let dir = TempDir::new().unwrap();
        let config = test_config(backend.base_url(), &dir);

        let state = load_widget_state(&config, WidgetKind::ProjectCapacity).await.unwrap();

        assert_eq!(
            state.error(),
            Some("No fue posible cargar la gráfica de acumulado de capacidad.")
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error_state() {
        let dir = TempDir::new().unwrap();
        let config = test_config("http://127.0.0.1:9/api".to_string(), &dir);

        let state = load_widget_state(&config, WidgetKind::ProjectCapacity).await.unwrap();

        assert!(state.is_error());
    }

    #[tokio::test]
    async fn test_capacity_chart_sums_by_source_and_is_never_cached() {
        let backend = spawn_backend(Reply::ok(generation_body()), Reply::ok(capacity_body())).await;
        let dir = TempDir::new().unwrap();
        let config = test_config(backend.base_url(), &dir);

        let (chart, from_cache) =
            expect_ready(load_widget_state(&config, WidgetKind::ProjectCapacity).await.unwrap());
        let (_, again_cached) =
            expect_ready(load_widget_state(&config, WidgetKind::ProjectCapacity).await.unwrap());

        assert!(!from_cache && !again_cached);
        assert_eq!(backend.capacity_hits(), 2);
        assert_eq!(chart.categories(), ["SOLAR", "EOLICA"]);
        assert_eq!(chart.series[0].data, vec![25.0, 40.0]);
        assert_eq!(chart.series[1].data, vec![4.0, 2.0]);
    }

    #[tokio::test]
    async fn test_clear_cache_keeps_foreign_entries() {
        let backend = spawn_backend(Reply::ok(generation_body()), Reply::ok(capacity_body())).await;
        let dir = TempDir::new().unwrap();
        let config = test_config(backend.base_url(), &dir);

        load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap();
        {
            let mut storage =
                FileStorage::open(config.cache_file(), config.cache_quota_bytes).unwrap();
            storage.set_item("otra-app", "valor").unwrap();
        }

        assert_eq!(clear_cache(&config).unwrap(), 1);

        let storage = FileStorage::open(config.cache_file(), config.cache_quota_bytes).unwrap();
        assert_eq!(storage.keys(), vec!["otra-app".to_string()]);

        let (_, from_cache) =
            expect_ready(load_widget_state(&config, WidgetKind::DailyGeneration).await.unwrap());
        assert!(!from_cache);
        assert_eq!(backend.generation_hits(), 2);
    }
}
