//! Terminal output helpers: plain lines, coloured errors and a boxed banner for big results.

use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use crate::error::AppError;
use crate::models::Quiz;

pub fn log(msg: impl AsRef<str>) {
    println!("{}", msg.as_ref());
}

/// Prints a command failure. Validation failures get one line per violated field.
pub fn error_log(err: &AppError) {
    match err {
        AppError::Validation(violations) => {
            eprintln!("{}", "Error: The quiz is not valid:".red().bold());
            for violation in violations {
                eprintln!("  {} {}", "-".red(), violation.red());
            }
        },
        other => eprintln!("{} {}", "Error:".red().bold(), other.to_string().red()),
    }
}

/// `[id]: question`
pub fn quiz_line(quiz: &Quiz) -> String {
    format!(" [{}]: {}", quiz.id.to_string().magenta(), quiz.question)
}

/// `[id]: question => answer`
pub fn quiz_detail(quiz: &Quiz) -> String {
    format!(
        " [{}]: {} {} {}",
        quiz.id.to_string().magenta(),
        quiz.question,
        "=>".magenta(),
        quiz.answer
    )
}

/// Renders `text` spaced out in capitals inside a rounded box.
pub fn banner(text: &str, color: Color) -> String {
    let spaced = text
        .trim()
        .to_uppercase()
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .add_row(vec![Cell::new(spaced)
            .fg(color)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center)]);
    if let Some(column) = table.column_mut(0) {
        column.set_padding((4, 4));
    }
    table.to_string()
}

pub fn big_log(text: &str, color: Color) {
    println!("{}", banner(text, color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quiz() -> Quiz {
        Quiz {
            id: 3,
            question: "Capital of Spain".to_string(),
            answer: "Madrid".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_banner_spells_text_in_a_box() {
        let rendered = banner("ok", Color::Green);
        assert!(rendered.contains("O K"));
        assert!(rendered.contains('╭'), "expected rounded corners: {}", rendered);
    }

    #[test]
    fn test_quiz_lines_carry_id_question_and_answer() {
        colored::control::set_override(false);
        assert_eq!(quiz_line(&quiz()), " [3]: Capital of Spain");
        assert_eq!(quiz_detail(&quiz()), " [3]: Capital of Spain => Madrid");
    }
}
