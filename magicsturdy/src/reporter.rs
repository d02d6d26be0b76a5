use crate::descriptor::KeyboardReport;

/// Reporter trait is used for reporting HID messages to the host.
pub trait Reporter {
    /// The report type that the reporter receives from the key processor.
    type ReportType;

    /// Write report to the host
    fn write_report(&mut self, report: Self::ReportType);
}

/// Keeps every report, used when the host is not connected yet or in tests.
impl<const N: usize> Reporter for heapless::Vec<KeyboardReport, N> {
    type ReportType = KeyboardReport;

    fn write_report(&mut self, report: Self::ReportType) {
        if self.push(report).is_err() {
            error!("Report buffer full, dropping keyboard report");
        }
    }
}
