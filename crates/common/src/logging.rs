//! Provides utilities to initialize logging and OpenTelemetry tracing for the relay node.
use std::env;

use opentelemetry::{trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable name for the OTLP collector endpoint.
pub const OTLP_URL_ENVVAR: &str = "RELAY_NODE_OTLP_URL";
/// Environment variable name for the service label, which is appended to the
/// whoami string.
pub const SVC_LABEL_ENVVAR: &str = "RELAY_NODE_SVC_LABEL";

/// Configuration for the logger.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// The whoami string, which is used to identify the service in logs.
    whoami: String,

    /// The OpenTelemetry URL for exporting traces.
    otel_url: Option<String>,
}

impl LoggerConfig {
    /// Creates a new empty instance with whoami set.
    pub const fn new(whoami: String) -> Self {
        Self {
            whoami,
            otel_url: None,
        }
    }

    /// Creates a new instance with the whoami string derived from the provided base name and the
    /// service label envvar.
    pub fn with_base_name(s: &str) -> Self {
        Self::new(get_whoami_string(s))
    }

    /// Sets the opentelemetry URL to the provided string.
    pub fn set_otlp_url(&mut self, url: String) {
        self.otel_url = Some(url);
    }

    /// Returns the whoami string.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::with_base_name("(relay-node)")
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Calling this more than once (as tests in the same process do) keeps the first subscriber.
pub fn init(config: LoggerConfig) {
    let filt = tracing_subscriber::EnvFilter::from_default_env();

    let log_file = env::var("LOG_FILE").is_ok_and(|v| v == "1");
    let log_line_num = env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    // Stdout logging.
    let stdout_sub = tracing_subscriber::fmt::layer()
        .compact()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(log_file)
                .with_line_number(log_line_num),
        )
        .with_filter(filt);

    let res = match &config.otel_url {
        Some(otel_url) => {
            let resource = Resource::builder()
                .with_attribute(KeyValue::new("service.name", config.whoami.clone()))
                .build();

            match opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(otel_url)
                .build()
            {
                Ok(exporter) => {
                    let tp = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                        .with_resource(resource)
                        .with_batch_exporter(exporter)
                        .build();

                    let tracer = tp.tracer("relay-node");

                    let otel_sub = tracing_opentelemetry::layer().with_tracer(tracer);

                    tracing_subscriber::registry()
                        .with(stdout_sub)
                        .with(otel_sub)
                        .try_init()
                }
                Err(e) => {
                    eprintln!("could not build OTLP exporter, falling back to stdout: {e}");
                    tracing_subscriber::registry().with(stdout_sub).try_init()
                }
            }
        }
        None => tracing_subscriber::registry().with(stdout_sub).try_init(),
    };

    match res {
        Ok(()) => info!(whoami = %config.whoami, "logging started"),
        Err(e) => debug!(%e, "logging already initialized"),
    }
}

/// Gets the OTLP URL from the standard envvar.
pub fn get_otlp_url_from_env() -> Option<String> {
    env::var(OTLP_URL_ENVVAR).ok()
}

/// Gets the service label from the standard envvar, which should be included
/// in the whoami string.
pub fn get_service_label_from_env() -> Option<String> {
    env::var(SVC_LABEL_ENVVAR).ok()
}

/// Computes a standard whoami string.
pub fn get_whoami_string(base: &str) -> String {
    match get_service_label_from_env() {
        Some(label) => format!("{base}%{label}"),
        None => base.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        init(LoggerConfig::new("logging-test-first".to_string()));
        init(LoggerConfig::new("logging-test-second".to_string()));

        info!("still logging");
    }

    #[test]
    fn test_bad_otlp_url_falls_back_to_stdout() {
        let mut config = LoggerConfig::new("logging-test-otlp".to_string());
        config.set_otlp_url("not a url".to_string());

        init(config.clone());
        init(config);

        assert!(dispatcher::has_been_set());
    }

    #[test]
    fn test_whoami_uses_base_name() {
        let config = LoggerConfig::new("relay".to_string());
        assert_eq!(config.whoami(), "relay");
    }
}
