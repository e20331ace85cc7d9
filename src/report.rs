use mancala_core::experiment::{SeatSummary, Summary, Tally};
use std::fmt::Write;

/// Renders per-seat win/loss/draw percentages as a plain-text table.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    render_seat(&mut out, "P1 (top row)", &summary.p1);
    out.push('\n');
    render_seat(&mut out, "P2 (bottom row)", &summary.p2);
    out
}

fn render_seat(out: &mut String, title: &str, seat: &SeatSummary) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(
        out,
        "  {:<9} {:>6} {:>7} {:>7} {:>7}",
        "heuristic", "games", "win%", "loss%", "draw%"
    );
    for (heuristic, tally) in &seat.by_heuristic {
        render_row(out, heuristic.label(), tally);
    }
    render_row(out, "overall", &seat.overall);
}

fn render_row(out: &mut String, label: &str, tally: &Tally) {
    let (win, loss, draw) = tally.percentages();
    let _ = writeln!(
        out,
        "  {label:<9} {:>6} {win:>7.1} {loss:>7.1} {draw:>7.1}",
        tally.games
    );
}
