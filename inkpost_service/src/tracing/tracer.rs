use std::error::Error;

use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{EnvFilter, fmt::format::Format, prelude::*};

use crate::config::{AppConfig, DistributionConfig, TracingConfig};

pub struct Tracer;

impl Tracer {
    /// Installs the global subscriber selected by `config.tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn install(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        match config.tracing {
            TracingConfig::Memory => Ok(()),
            TracingConfig::Stdout => Self::install_stdout(&config.distribution),
        }
    }

    /// Pretty events filtered by `RUST_LOG`, spans exported to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn install_stdout(
        distribution: &DistributionConfig,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        global::set_text_map_propagator(TraceContextPropagator::new());
        global::set_tracer_provider(
            SdkTracerProvider::builder()
                .with_resource(service_resource(distribution))
                .with_simple_exporter(SpanExporter::default())
                .build(),
        );

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(Format::default().pretty())
                    .with_filter(EnvFilter::from_default_env()),
            )
            .try_init()?;
        Ok(())
    }
}

fn service_resource(distribution: &DistributionConfig) -> Resource {
    let builder = Resource::builder().with_service_name(distribution.name.clone());
    match &distribution.version {
        Some(version) => builder
            .with_attribute(KeyValue::new("service.version", version.clone()))
            .build(),
        None => builder.build(),
    }
}
