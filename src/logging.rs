use crate::api::todo::TODO_ITEM_ROUTE;
use crate::app_env;
use anyhow::Context;
use axum::Router;
use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_http::HeaderExtractor;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::Tracer;
use opentelemetry_sdk::{Resource, runtime};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::{Span, debug, debug_span, field};
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer, OpenTelemetrySpanExt};
use tracing_subscriber::{EnvFilter, prelude::*, registry};

/// The name of the service as it should appear in OpenTelemetry collectors
const SERVICE_NAME: &str = "todo-rest";

/// Struct containing OpenTelemetry primitives which export data to a tracing server
pub struct OtelExporters {
    pub tracer: Tracer,
    pub meter: SdkMeterProvider,
}

/// The todo a request operates on, taken from the request path when the request was routed
/// to [TODO_ITEM_ROUTE]. Requests on the todo collection or other routes target no single todo.
fn targeted_todo_id<'a>(matched_route: Option<&str>, path: &'a str) -> Option<&'a str> {
    if matched_route != Some(TODO_ITEM_ROUTE) {
        return None;
    }

    path.rsplit('/').next().filter(|todo_id| !todo_id.is_empty())
}

/// Opens the "request" span. The span records the route the request matched and, for
/// single-todo routes, the todo ID. Trace context sent by the caller becomes the span's parent.
fn request_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let matched_route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str);

    let req_span = debug_span!(
        "request",
        method = %request.method(),
        route = matched_route.unwrap_or(path),
        todo_id = field::Empty,
        response_status = field::Empty,
    );
    if let Some(todo_id) = targeted_todo_id(matched_route, path) {
        req_span.record("todo_id", todo_id);
    }

    req_span.set_parent(global::get_text_map_propagator(|propagator| {
        propagator.extract(&HeaderExtractor(request.headers()))
    }));

    req_span
}

/// Wraps every route of [router] in a request span (see [request_span]) and logs how long
/// each request took to answer
pub fn attach_tracing_http<T>(router: Router<T>) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(
                    |response: &Response<Body>, latency: Duration, span: &Span| {
                        span.record("response_status", field::display(response.status()));
                        debug!(?latency, "Finished handling request");
                    },
                ),
        ),
    )
}

fn service_resource() -> Resource {
    Resource::new([KeyValue::new("service.name", SERVICE_NAME)])
}

/// Instantiates OpenTelemetry exporters which send spans and metrics to gRPC collectors in the
/// background (typically a sidecar at http://localhost:4317). Must be called from within the
/// Tokio runtime.
pub fn init_exporters(
    otlp_traces_endpoint: &str,
    otlp_metrics_endpoint: &str,
) -> Result<OtelExporters, anyhow::Error> {
    let span_export = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_traces_endpoint)
        .build()
        .with_context(|| format!("building the span exporter for {otlp_traces_endpoint}"))?;
    let meter_export = MetricExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_metrics_endpoint)
        .build()
        .with_context(|| format!("building the metric exporter for {otlp_metrics_endpoint}"))?;

    let tracer = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(span_export, runtime::Tokio)
        .with_resource(service_resource())
        .build()
        .tracer(SERVICE_NAME);
    let meter = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(meter_export, runtime::Tokio).build())
        .with_resource(service_resource())
        .build();

    Ok(OtelExporters { tracer, meter })
}

/// Constructs a filter which uses [app_env::LOG_LEVEL] to configure per-module logging. Filters
/// to the "info" level by default.
pub fn init_env_filter() -> Result<EnvFilter, anyhow::Error> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env()
        .context("building the logging filter from LOG_LEVEL")
}

/// Installs the global subscriber. JSON logs go to stdout, filtered by [env_filter]. When
/// [otel_exporters] is given, spans and metrics at "debug" and above are exported as well.
pub fn setup_logging_and_tracing(env_filter: EnvFilter, otel_exporters: Option<OtelExporters>) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let (otel_spans, otel_metrics) = match otel_exporters {
        Some(OtelExporters { tracer, meter }) => (
            Some(OpenTelemetryLayer::new(tracer)),
            Some(MetricsLayer::new(meter)),
        ),
        None => (None, None),
    };

    registry()
        .with(LevelFilter::DEBUG)
        .with(otel_spans)
        .with(otel_metrics)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_filter(env_filter),
        )
        .init();
}
