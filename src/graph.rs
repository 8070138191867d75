use std::io::stdout;

use anyhow::Result;
use crossterm::execute;
use ratatui::{
    backend::CrosstermBackend,
    layout::Direction,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Block},
    Terminal, TerminalOptions, Viewport,
};

use petlovers::Snapshot;

use crate::cli::PlotRanking;
use crate::currency::Currency;

/// One bar: label, plotted value and the text printed next to it.
struct Point {
    label: String,
    value: u64,
    text: String,
}

fn points(
    snapshot: &Snapshot,
    ranking: PlotRanking,
    limit: usize,
    currency: &Currency,
) -> Vec<Point> {
    match ranking {
        PlotRanking::Clients => snapshot
            .rank_clients_by_quantity(limit)
            .into_iter()
            .map(|r| Point {
                label: r.name,
                value: r.total,
                text: r.total.to_string(),
            })
            .collect(),
        PlotRanking::Value => snapshot
            .rank_clients_by_value(limit)
            .into_iter()
            .map(|r| Point {
                label: r.name,
                // Bars need integers; plot whole currency units
                value: r.value.max(0.0).round() as u64,
                text: currency.format(r.value),
            })
            .collect(),
        PlotRanking::Products => code_points(snapshot.rank_products(limit)),
        PlotRanking::Services => code_points(snapshot.rank_services(limit)),
    }
}

fn code_points(rows: Vec<petlovers::types::CodeRow>) -> Vec<Point> {
    rows.into_iter()
        .map(|r| Point {
            label: format!("{} {}", r.code, r.name),
            value: r.total,
            text: r.total.to_string(),
        })
        .collect()
}

pub fn default_limit(ranking: PlotRanking) -> usize {
    use petlovers::rank;
    match ranking {
        PlotRanking::Clients => rank::CLIENTS_BY_QUANTITY_LIMIT,
        PlotRanking::Value => rank::CLIENTS_BY_VALUE_LIMIT,
        PlotRanking::Products => rank::PRODUCTS_LIMIT,
        PlotRanking::Services => rank::SERVICES_LIMIT,
    }
}

/// One line per bar plus gaps, plus the border. Saturates for huge limits.
fn chart_height(bars: usize) -> u16 {
    let lines = bars.saturating_mul(2).saturating_add(1);
    u16::try_from(lines).unwrap_or(u16::MAX)
}

pub fn render(
    snapshot: &Snapshot,
    ranking: PlotRanking,
    limit: usize,
    currency: &Currency,
) -> Result<()> {
    let points = points(snapshot, ranking, limit, currency);

    if points.is_empty() {
        eprintln!("Nothing to plot.");
        return Ok(());
    }

    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.value)
                .text_value(p.text.clone())
                .label(p.label.clone().into())
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let title = match ranking {
        PlotRanking::Clients => "Top clients by items consumed".to_string(),
        PlotRanking::Value => format!("Top clients by value ({})", currency.code),
        PlotRanking::Products => "Most consumed products".to_string(),
        PlotRanking::Services => "Most consumed services".to_string(),
    };

    let chart = BarChart::default()
        .block(Block::bordered().title(title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::White))
        .label_style(Style::default().fg(Color::DarkGray));

    let chart_height = chart_height(points.len());

    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(stdout()),
        TerminalOptions {
            viewport: Viewport::Inline(chart_height),
        },
    )?;

    terminal.draw(|frame| {
        frame.render_widget(chart, frame.area());
    })?;

    // Move cursor below the chart
    execute!(stdout(), crossterm::cursor::MoveDown(1))?;

    Ok(())
}
