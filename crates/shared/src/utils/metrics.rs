use crate::errors::ServiceError;
use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    sync::{Arc, atomic::AtomicU64},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::time::Instant;

const COLLECT_INTERVAL: Duration = Duration::from_secs(15);

/// Reads the thread count from `/proc/<pid>/status`; `None` off Linux.
fn thread_count(pid: Pid) -> Option<i64> {
    let status = std::fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("Threads:"))
        .and_then(|count| count.trim().parse().ok())
}

/// Process gauges refreshed by [`run_metrics_collector`].
#[derive(Debug, Clone, Default)]
pub struct SystemMetrics {
    pub resident_memory_bytes: Gauge,
    pub virtual_memory_bytes: Gauge,
    pub available_memory_bytes: Gauge,
    pub threads: Gauge,
    pub cpu_usage_percent: Gauge<f64, AtomicU64>,
    pub start_time_seconds: Gauge,
}

impl SystemMetrics {
    pub fn new() -> Self {
        let metrics = Self::default();

        let started = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        metrics.start_time_seconds.set(started);

        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        let process = registry.sub_registry_with_prefix("process");

        process.register(
            "resident_memory_bytes",
            "Resident memory of the API process in bytes",
            self.resident_memory_bytes.clone(),
        );
        process.register(
            "virtual_memory_bytes",
            "Virtual memory of the API process in bytes",
            self.virtual_memory_bytes.clone(),
        );
        process.register(
            "available_memory_bytes",
            "Memory available on the host in bytes",
            self.available_memory_bytes.clone(),
        );
        process.register(
            "threads",
            "Number of OS threads in the API process",
            self.threads.clone(),
        );
        process.register(
            "cpu_usage_percent",
            "Host CPU usage across all cores",
            self.cpu_usage_percent.clone(),
        );
        process.register(
            "start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.start_time_seconds.clone(),
        );
    }

    pub fn refresh(&self, sys: &mut System, pid: Pid) {
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        self.available_memory_bytes.set(sys.available_memory() as i64);
        self.cpu_usage_percent.set(f64::from(sys.global_cpu_usage()));

        if let Some(process) = sys.process(pid) {
            self.resident_memory_bytes.set(process.memory() as i64);
            self.virtual_memory_bytes.set(process.virtual_memory() as i64);
        }

        if let Some(threads) = thread_count(pid) {
            self.threads.set(threads);
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry, prefix: &str, component: &str) {
        registry.register(
            format!("{prefix}_request_counter"),
            format!("Total number of requests to the {component}"),
            self.request_counter.clone(),
        );
        registry.register(
            format!("{prefix}_request_duration"),
            format!("Histogram of request durations for the {component}"),
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }

    /// Runs `operation` and records its duration and outcome.
    pub async fn observe<T, F>(&self, method: Method, operation: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        let timer = self.start(method);
        let result = operation.await;
        timer.finish(&result);
        result
    }

    pub fn start(&self, method: Method) -> OperationTimer<'_> {
        OperationTimer {
            metrics: self,
            method,
            start_time: Instant::now(),
        }
    }
}

/// Measures one service operation and records it when finished.
pub struct OperationTimer<'a> {
    metrics: &'a Metrics,
    method: Method,
    start_time: Instant,
}

impl OperationTimer<'_> {
    pub fn finish<T, E>(self, result: &Result<T, E>) {
        let status = if result.is_ok() {
            Status::Success
        } else {
            Status::Error
        };
        self.metrics.record(
            self.method,
            status,
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let pid = Pid::from_u32(std::process::id());
    let mut sys = System::new();
    let mut interval = tokio::time::interval(COLLECT_INTERVAL);

    loop {
        interval.tick().await;
        system_metrics.refresh(&mut sys, pid);
    }
}
