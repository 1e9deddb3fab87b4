use std::fmt;

use crate::eval::error_rate;
use crate::network::EvalContext;

#[derive(Debug, Clone)]
pub struct ReportRow {
    pub network: String,
    pub error_rate: f64,
}

/// Final per-network top-1 error rates, in evaluation order.
#[derive(Debug, Clone)]
pub struct EvalReport {
    rows: Vec<ReportRow>,
}

impl EvalReport {
    pub(crate) fn from_logs(ctx: &EvalContext, logs: &[Vec<bool>]) -> Self {
        let rows = ctx
            .networks()
            .iter()
            .zip(logs)
            .map(|(net, net_log)| ReportRow {
                network: net.descriptor().name.clone(),
                error_rate: error_rate(net_log),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn render(&self) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.network.len())
            .chain([NAME_HEADER.len()])
            .max()
            .unwrap_or(NAME_HEADER.len());
        let value_width = VALUE_HEADER.len();

        let rule = format!(
            "+-{}-+-{}-+\n",
            "-".repeat(name_width),
            "-".repeat(value_width)
        );

        let mut s = String::new();
        s.push_str(&rule);
        s.push_str(&format!(
            "| {:name_width$} | {:value_width$} |\n",
            NAME_HEADER, VALUE_HEADER
        ));
        s.push_str(&rule);
        for row in &self.rows {
            let value = format!("{:.2}%", row.error_rate * 100.0);
            s.push_str(&format!(
                "| {:name_width$} | {:value_width$} |\n",
                row.network, value
            ));
        }
        s.push_str(&rule);
        s
    }
}

const NAME_HEADER: &str = "Network";
const VALUE_HEADER: &str = "Top-1 Error";

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
