// View surface - The rendering target the dashboard writes into
use crate::domain::vehicle::StatusClass;
use crate::presentation::charts::ChartData;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Badge { class: StatusClass, text: String },
    /// A button acting on the record identified by `target`
    Action { label: String, target: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

/// A non-blocking error message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Badge { class, text } => write!(f, "{} ({})", text, class.label()),
            Cell::Action { label, target } => write!(f, "[{} {}]", label, target),
        }
    }
}

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.cells.iter().map(Cell::to_string).collect();
        f.write_str(&cells.join(" | "))
    }
}

/// Page markup and chart library, seen from the dashboard.
///
/// Elements are addressed by the ids held in
/// [`ViewBindings`](crate::presentation::bindings::ViewBindings).
pub trait ViewSurface: Send {
    fn set_text(&mut self, slot: &str, text: &str);

    fn set_active(&mut self, element: &str, active: bool);

    /// Replaces the whole table body.
    fn replace_table_body(&mut self, table: &str, rows: Vec<TableRow>);

    /// Pushes a chart's current labels and dataset to the chart widget.
    fn render_chart(&mut self, chart: &str, data: &ChartData);

    fn notify(&mut self, notification: Notification);
}

/// Everything visible on a [`MemorySurface`], comparable between renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedView {
    pub texts: BTreeMap<String, String>,
    pub active: BTreeSet<String>,
    pub tables: BTreeMap<String, Vec<TableRow>>,
    pub charts: BTreeMap<String, ChartData>,
}

/// In-memory surface used by the headless binary and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    view: RenderedView,
    notifications: Vec<Notification>,
    text_writes: BTreeMap<String, usize>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.view.texts.get(slot).map(String::as_str)
    }

    /// Number of times `slot` has been written, identical values included.
    pub fn text_writes(&self, slot: &str) -> usize {
        self.text_writes.get(slot).copied().unwrap_or(0)
    }

    pub fn is_active(&self, element: &str) -> bool {
        self.view.active.contains(element)
    }

    pub fn active_elements(&self) -> impl Iterator<Item = &str> {
        self.view.active.iter().map(String::as_str)
    }

    pub fn table(&self, table: &str) -> &[TableRow] {
        self.view.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn chart(&self, chart: &str) -> Option<&ChartData> {
        self.view.charts.get(chart)
    }

    /// Notifications not yet shown to the user.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Hands the pending notifications over, leaving none behind.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn rendered(&self) -> &RenderedView {
        &self.view
    }
}

impl ViewSurface for MemorySurface {
    fn set_text(&mut self, slot: &str, text: &str) {
        *self.text_writes.entry(slot.to_string()).or_default() += 1;
        self.view.texts.insert(slot.to_string(), text.to_string());
    }

    fn set_active(&mut self, element: &str, active: bool) {
        if active {
            self.view.active.insert(element.to_string());
        } else {
            self.view.active.remove(element);
        }
    }

    fn replace_table_body(&mut self, table: &str, rows: Vec<TableRow>) {
        self.view.tables.insert(table.to_string(), rows);
    }

    fn render_chart(&mut self, chart: &str, data: &ChartData) {
        self.view.charts.insert(chart.to_string(), data.clone());
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

impl fmt::Display for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, text) in &self.view.texts {
            writeln!(f, "{:<24} {}", slot, text)?;
        }
        for (table, rows) in &self.view.tables {
            writeln!(f, "{:<24} {} rows", table, rows.len())?;
            for row in rows {
                writeln!(f, "  {}", row)?;
            }
        }
        for (chart, data) in &self.view.charts {
            writeln!(f, "{:<24} {:?}", chart, data.dataset.data)?;
        }
        let active: Vec<&str> = self.active_elements().collect();
        write!(f, "{:<24} {}", "active", active.join(", "))?;
        for notification in &self.notifications {
            write!(f, "\n! {}", notification.message)?;
        }
        Ok(())
    }
}

/// Renders the surface, then drops the notifications it just showed.
pub fn present(surface: &mut MemorySurface) -> String {
    let text = surface.to_string();
    surface.take_notifications();
    text
}
