#[cfg(test)]
#[path = "derivation_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::SolveResult;

pub const POSITIVE_COLOR: Color = Color::Rgb(25, 135, 84);
pub const NEGATIVE_COLOR: Color = Color::Rgb(220, 53, 69);

pub fn verdict_style(result: bool) -> Style {
    let style = Style::default().fg(Color::White);
    if result {
        return style.bg(POSITIVE_COLOR).add_modifier(Modifier::BOLD);
    }

    return style.bg(NEGATIVE_COLOR);
}

/// Numbered derivation lines. The final step carries the verdict styling.
pub fn as_lines(solved: &SolveResult) -> Vec<Line<'static>> {
    let last_idx = solved.steps.len().saturating_sub(1);
    let width = solved.steps.len().to_string().len();

    return solved
        .steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let number = Span::styled(
                format!("{:>width$}. ", idx + 1),
                Style::default().fg(Color::DarkGray),
            );

            if idx == last_idx {
                return Line::from(vec![
                    number,
                    Span::styled(format!(" {step} "), verdict_style(solved.result)),
                ]);
            }

            return Line::from(vec![number, Span::raw(step.to_string())]);
        })
        .collect();
}
