use {
    crate::{
        analysis::{CrossingEvent, LevelSet},
        config::format_price,
        engine::MarketReport,
        utils::epoch_ms_to_utc,
    },
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Level")]
    level: &'static str,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct CrossingRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Level")]
    level: &'static str,
    #[tabled(rename = "Level Price")]
    level_price: String,
    #[tabled(rename = "Signal")]
    direction: String,
    #[tabled(rename = "Close")]
    close: String,
}

#[derive(Tabled)]
struct ScanRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Swing Range")]
    range: String,
    #[tabled(rename = "Crossings")]
    crossings: String,
    #[tabled(rename = "Last Crossing")]
    last_crossing: String,
    #[tabled(rename = "Alert")]
    alert: String,
    #[tabled(rename = "Prediction")]
    prediction: String,
}

pub fn levels_table(levels: &LevelSet) -> String {
    let rows = levels.iter().map(|l| LevelRow {
        level: l.ratio.label(),
        price: format_price(l.price),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn crossings_table(events: &[CrossingEvent]) -> String {
    let rows = events.iter().map(|e| CrossingRow {
        time: epoch_ms_to_utc(e.timestamp_ms),
        level: e.ratio.label(),
        level_price: format_price(e.level_price),
        direction: e.direction.to_string(),
        close: format_price(e.price_at_event),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn scan_table(reports: &[MarketReport]) -> String {
    let rows = reports.iter().map(|r| {
        let (range, crossings, prediction) = match &r.window {
            Ok(w) => (
                w.range.to_string(),
                w.crossings.len().to_string(),
                match &w.prediction {
                    Some(Ok(label)) => label.to_string(),
                    Some(Err(e)) => format!("⚠️ {}", e),
                    None => "-".to_string(),
                },
            ),
            Err(e) => (format!("⚠️ {:#}", e), "-".to_string(), "-".to_string()),
        };
        let last_crossing = r
            .last_crossing()
            .map(|c| format!("{} {} @ {}", c.direction, c.ratio, epoch_ms_to_utc(c.timestamp_ms)))
            .unwrap_or_else(|| "-".to_string());

        ScanRow {
            market: r.market.to_string(),
            range,
            crossings,
            last_crossing,
            alert: r.alert.to_string(),
            prediction,
        }
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
