use std::fmt::Write;

use weatherview_core::WeatherReport;

/// Multi-line text block for a report. Placeholder reports only print the
/// fields that carry text.
pub fn report(report: &WeatherReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.city);

    let mut line = |label: &str, value: &str| {
        if !value.is_empty() {
            let _ = writeln!(out, "  {label:<11}: {value}");
        }
    };

    line("Temperature", &report.temperature);
    line("Feels like", &report.feels_like);
    line("Humidity", &report.humidity);
    line("Wind", &report.wind);

    let local_time = match report.day_part {
        Some(part) => format!("{} ({part})", report.local_time),
        None => report.local_time.clone(),
    };
    line("Local time", &local_time);
    line("Conditions", &report.description);

    if let Some(background) = report.background {
        line("Background", background.as_str());
    }

    out
}
