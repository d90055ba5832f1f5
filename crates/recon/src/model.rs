use serde::Serialize;

use crate::columns::ProductionField;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One buyer-order row from the schedule file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleRecord {
    pub sl: String,
    pub job_no: Option<String>,
    pub order_no: Option<String>,
    pub style_no: String,
    pub color: String,
}

/// Quantity fields of a production row.
///
/// `None` means the column does not exist in the production source; a
/// present but blank or non-numeric cell is `Some(0.0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Quantities {
    pub order_qty: Option<f64>,
    pub plan_cut_qty: Option<f64>,
    pub total_cut_qty: Option<f64>,
    pub cutting_balance: Option<f64>,
    pub sew_input: Option<f64>,
    pub sew_output: Option<f64>,
    pub iron: Option<f64>,
    pub packing_finish: Option<f64>,
    pub ship_out: Option<f64>,
}

impl Quantities {
    pub fn set(&mut self, field: ProductionField, value: Option<f64>) {
        let slot = match field {
            ProductionField::OrderQty => &mut self.order_qty,
            ProductionField::PlanCutQty => &mut self.plan_cut_qty,
            ProductionField::TotalCutQty => &mut self.total_cut_qty,
            ProductionField::CuttingBalance => &mut self.cutting_balance,
            ProductionField::SewInput => &mut self.sew_input,
            ProductionField::SewOutput => &mut self.sew_output,
            ProductionField::Iron => &mut self.iron,
            ProductionField::PackingFinish => &mut self.packing_finish,
            ProductionField::ShipOut => &mut self.ship_out,
            _ => return,
        };
        *slot = value;
    }

    /// Sew input minus sew output, absent values counting as zero.
    pub fn sewing_balance(&self) -> f64 {
        self.sew_input.unwrap_or(0.0) - self.sew_output.unwrap_or(0.0)
    }
}

/// One row of the production-tracking file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionRecord {
    /// Raw job cell as read (trimmed on load).
    pub job_no: Option<String>,
    pub order_no: Option<String>,
    pub quantities: Quantities,
    pub style_name: Option<String>,
    pub item_name: Option<String>,
    pub ship_date: Option<String>,
}

impl ProductionRecord {
    /// Trimmed string form of the job cell, as compared by the job query.
    pub fn job_str(&self) -> &str {
        self.job_no.as_deref().map(str::trim).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Report header, fixed order.
pub const OUTPUT_COLUMNS: [&str; 15] = [
    "SL",
    "JOB NO",
    "Order No",
    "STYLE NO",
    "COLOR",
    "Order Qty.",
    "Plan Cut Qty",
    "Total Cut Qty",
    "Cutting balance",
    "Total Sew Input Qty",
    "Total Sew Output Qty",
    "Sewing Balance",
    "Total Iron Qty",
    "Total Packing Finish Qty",
    "Total Ship Out",
];

/// Why a schedule row found no production counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// No job number could be extracted from the schedule row.
    NoJobKey,
    /// The job is not in the production data.
    JobNotFound { job_key: String },
    /// The job exists but not with this order number.
    OrderNotFound { job_key: String, order_key: String },
}

impl UnmatchedReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoJobKey => "no_job_key",
            Self::JobNotFound { .. } => "job_not_found",
            Self::OrderNotFound { .. } => "order_not_found",
        }
    }
}

impl std::fmt::Display for UnmatchedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoJobKey => write!(f, "no job number extracted"),
            Self::JobNotFound { job_key } => {
                write!(f, "Job '{job_key}' not found in production data")
            }
            Self::OrderNotFound { job_key, order_key } => {
                write!(f, "Job '{job_key}' matched but Order No '{order_key}' not found")
            }
        }
    }
}

/// Outcome for one schedule row. Positional: the n-th result belongs to the
/// n-th schedule row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Matched {
        schedule: ScheduleRecord,
        quantities: Quantities,
        sewing_balance: f64,
    },
    Unmatched {
        schedule: ScheduleRecord,
        reason: UnmatchedReason,
    },
}

/// A single report cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportCell {
    Text(String),
    Number(f64),
    Empty,
}

impl ReportCell {
    fn quantity(value: Option<f64>) -> Self {
        value.map(Self::Number).unwrap_or(Self::Empty)
    }

    /// Display text: integral numbers without decimals.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Empty => String::new(),
        }
    }
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl MatchResult {
    pub fn schedule(&self) -> &ScheduleRecord {
        match self {
            Self::Matched { schedule, .. } | Self::Unmatched { schedule, .. } => schedule,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn sewing_balance(&self) -> Option<f64> {
        match self {
            Self::Matched { sewing_balance, .. } => Some(*sewing_balance),
            Self::Unmatched { .. } => None,
        }
    }

    /// Report row in `OUTPUT_COLUMNS` order.
    pub fn cells(&self) -> [ReportCell; 15] {
        let s = self.schedule();
        let q = match self {
            Self::Matched { quantities, .. } => *quantities,
            Self::Unmatched { .. } => Quantities::default(),
        };
        let text = |v: &str| ReportCell::Text(v.to_string());

        [
            text(&s.sl),
            text(s.job_no.as_deref().unwrap_or("")),
            text(s.order_no.as_deref().unwrap_or("")),
            text(&s.style_no),
            text(&s.color),
            ReportCell::quantity(q.order_qty),
            ReportCell::quantity(q.plan_cut_qty),
            ReportCell::quantity(q.total_cut_qty),
            ReportCell::quantity(q.cutting_balance),
            ReportCell::quantity(q.sew_input),
            ReportCell::quantity(q.sew_output),
            ReportCell::quantity(self.sewing_balance()),
            ReportCell::quantity(q.iron),
            ReportCell::quantity(q.packing_finish),
            ReportCell::quantity(q.ship_out),
        ]
    }
}
