//! In-process request metrics rendered in Prometheus text format.
//!
//! Counters and histograms are keyed by sorted label vectors in a `DashMap`,
//! so rendering order within one family is stable per key set. Histogram
//! buckets are fixed in microseconds to avoid floating point math.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use marketpulse_core::metrics::MetricsSnapshot;

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn render_labels(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        self.map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for an exact label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{}{{{}}} {}", name, render_labels(r.key()), val);
        }
    }
}

// 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s
const BUCKETS_MICROS: [u64; 9] = [100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; 9],
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration; buckets are cumulative.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_default();
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let label_str = render_labels(r.key());
            let prefix = if label_str.is_empty() { String::new() } else { format!("{},", label_str) };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);
            let sum = hist.sum.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, label_str, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, label_str, count);
        }
    }
}

/// Gateway-wide request metrics plus the draining flag.
#[derive(Default)]
pub struct HttpMetrics {
    pub requests: CounterVec,
    pub request_duration: HistogramVec, // microseconds
    pub rejected_bodies: CounterVec,
    draining: AtomicBool,
}

impl HttpMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render request metrics followed by the live snapshot as gauges.
    pub fn render(&self, snap: &MetricsSnapshot, ticks: u64, publisher_running: bool) -> String {
        let mut out = String::new();
        self.requests.render("marketpulse_http_requests_total", &mut out);
        self.request_duration.render("marketpulse_http_request_duration_micros", &mut out);
        self.rejected_bodies.render("marketpulse_http_rejected_bodies_total", &mut out);

        let gauges: [(&str, u64); 7] = [
            ("marketpulse_active_agents", snap.active_agents),
            ("marketpulse_total_users", snap.total_users),
            ("marketpulse_revenue", snap.revenue),
            ("marketpulse_queries_processed", snap.queries_processed),
            ("marketpulse_realtime_queries", snap.realtime_queries),
            ("marketpulse_realtime_revenue", snap.realtime_revenue),
            ("marketpulse_realtime_users", snap.realtime_users),
        ];
        for (name, v) in gauges {
            let _ = writeln!(out, "# TYPE {} gauge\n{} {}", name, name, v);
        }

        let _ = writeln!(out, "# TYPE marketpulse_ticks_total counter\nmarketpulse_ticks_total {}", ticks);
        let _ = writeln!(
            out,
            "# TYPE marketpulse_publisher_running gauge\nmarketpulse_publisher_running {}",
            u8::from(publisher_running)
        );
        let _ = writeln!(
            out,
            "# TYPE marketpulse_draining gauge\nmarketpulse_draining {}",
            u8::from(self.is_draining())
        );
        out
    }
}
