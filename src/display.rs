use crate::lang::Language;
use crate::utils::text::{display_width, wrap_text};
use console::style;

/// Live reasoning feedback line, shown before a tool is dispatched.
pub fn display_progress(tool: &str, args_summary: &str) {
    println!(
        "{} {} {}",
        style("⚙").yellow(),
        style(tool).bold().cyan(),
        style(args_summary).dim()
    );
}

pub fn display_welcome(language: Language) {
    println!("{}", style(language.welcome()).bold());
    println!(
        "{}",
        style("Type /help for console commands. Ctrl-D or /quit exits.").dim()
    );
}

/// Render the agent's final answer in a bordered box.
pub fn display_answer(answer: &str) {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    let max_width = std::cmp::min(terminal_width.saturating_sub(4), 100).max(40);

    let mut wrapped = Vec::new();
    for line in answer.lines() {
        if line.is_empty() {
            wrapped.push(String::new());
        } else {
            wrapped.extend(wrap_text(line, max_width.saturating_sub(4)));
        }
    }

    let content_width = wrapped.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let box_width = std::cmp::min(max_width, content_width + 4);

    let top = "┌".to_string() + &"─".repeat(box_width.saturating_sub(2)) + "┐";
    let bottom = "└".to_string() + &"─".repeat(box_width.saturating_sub(2)) + "┘";

    println!("{}", style(&top).dim().green());
    for line in &wrapped {
        let padding = box_width.saturating_sub(display_width(line) + 4);
        println!("│ {}{} │", line, " ".repeat(padding));
    }
    println!("{}", style(&bottom).dim().green());
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("✗").bold().red(), style(message).red());
}
