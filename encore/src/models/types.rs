#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTime(pub chrono::DateTime<chrono::Utc>);

impl DateTime {
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Short clock label shown next to chat bubbles, e.g. "2:31 PM".
    pub fn clock_label(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}
