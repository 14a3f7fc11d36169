use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    events_recorded: AtomicU64,
    rule_rejections: AtomicU64,
    store_errors: AtomicU64,
    slack_commands: AtomicU64,
}

impl Metrics {
    pub fn record_event(&self) {
        self.events_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rule_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_slack_command(&self) {
        self.slack_commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let recorded = self.events_recorded.load(Ordering::Relaxed);
        let rejections = self.rule_rejections.load(Ordering::Relaxed);
        let store_errors = self.store_errors.load(Ordering::Relaxed);
        let slack = self.slack_commands.load(Ordering::Relaxed);

        format!(
            "# TYPE donut_events_recorded_total counter\n\
donut_events_recorded_total {}\n\
# TYPE donut_rule_rejections_total counter\n\
donut_rule_rejections_total {}\n\
# TYPE donut_store_errors_total counter\n\
donut_store_errors_total {}\n\
# TYPE donut_slack_commands_total counter\n\
donut_slack_commands_total {}\n",
            recorded, rejections, store_errors, slack
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counters() {
        let metrics = Metrics::default();
        metrics.record_event();
        metrics.record_event();
        metrics.record_rejection();
        let text = metrics.render_prometheus();
        assert!(text.contains("donut_events_recorded_total 2\n"));
        assert!(text.contains("donut_rule_rejections_total 1\n"));
        assert!(text.contains("donut_store_errors_total 0\n"));
    }
}
