use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use daybook_core::calendar::MonthGrid;
use daybook_core::models::{TaskInstance, TaskPriority};
use daybook_core::views::TaskViews;

use crate::config::Config;
use crate::util::short_id;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
/// Titles listed per calendar day before collapsing into "+N more".
const MAX_TITLES_PER_DAY: usize = 3;
const MAX_TITLE_CHARS: usize = 14;

/// Prints both lists, showing the first `id_len` characters of each id.
pub fn display_views(views: &TaskViews, config: &Config, id_len: usize) {
    println!("Today");
    if views.today.is_empty() {
        println!("No tasks for today.");
    } else {
        println!("{}", instance_table(&views.today, config, id_len, true));
    }

    println!();
    println!("Upcoming");
    if views.upcoming.is_empty() {
        println!("No upcoming tasks.");
    } else {
        println!("{}", instance_table(&views.upcoming, config, id_len, false));
    }
}

fn instance_table(
    instances: &[TaskInstance],
    config: &Config,
    id_len: usize,
    numbered: bool,
) -> Table {
    let mut table = Table::new();
    let mut header = vec!["ID", "Title", "Due", "Priority", "Tags", "Subtasks"];
    if numbered {
        header.insert(0, "#");
    }
    table.set_header(header);

    for (index, instance) in instances.iter().enumerate() {
        let task = &instance.task;
        let mut row = Row::new();
        if numbered {
            row.add_cell(Cell::new(index + 1));
        }
        row.add_cell(Cell::new(short_id(&task.id, id_len)));

        let mut display_name = String::new();
        if instance.is_instance {
            display_name.push('↻'); // Recurring symbol
            display_name.push(' ');
        }
        display_name.push_str(&task.title);

        let mut name_cell = Cell::new(display_name);
        if instance.is_complete() {
            name_cell = name_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else {
            name_cell = match task.priority {
                TaskPriority::High => name_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                TaskPriority::Medium => name_cell.fg(Color::Yellow),
                TaskPriority::Low => name_cell.fg(Color::Green),
            };
        }
        row.add_cell(name_cell);

        let mut due_text = config.format_date(instance.due_date);
        if task.recurrence.is_recurring() {
            due_text = format!("{} ({})", due_text, task.recurrence);
        }
        row.add_cell(Cell::new(due_text));
        row.add_cell(Cell::new(task.priority));
        row.add_cell(Cell::new(if task.tags.is_empty() {
            "None".to_string()
        } else {
            task.tags.join(", ")
        }));

        let subtasks = if task.subtasks.is_empty() {
            "None".to_string()
        } else {
            task.subtasks
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. [{}] {}", i + 1, if s.is_complete { "x" } else { " " }, s.text))
                .collect::<Vec<_>>()
                .join("\n")
        };
        row.add_cell(Cell::new(subtasks));
        table.add_row(row);
    }

    table
}

pub fn display_calendar(grid: &MonthGrid, today: NaiveDate) {
    println!("{}", grid.cursor.name());

    let mut table = Table::new();
    table.set_header(WEEKDAYS.to_vec());

    for week in grid.weeks() {
        let mut row = Row::new();
        for slot in week {
            let Some(day) = slot else {
                row.add_cell(Cell::new(""));
                continue;
            };

            let mut lines = vec![chrono::Datelike::day(&day.date).to_string()];
            lines.extend(
                day.instances
                    .iter()
                    .take(MAX_TITLES_PER_DAY)
                    .map(|i| format!("• {}", truncate(&i.task.title, MAX_TITLE_CHARS))),
            );
            if day.instances.len() > MAX_TITLES_PER_DAY {
                lines.push(format!("+{} more", day.instances.len() - MAX_TITLES_PER_DAY));
            }

            let mut cell = Cell::new(lines.join("\n"));
            if day.date == today {
                cell = cell.fg(Color::Cyan).add_attribute(Attribute::Bold);
            }
            row.add_cell(cell);
        }
        table.add_row(row);
    }

    println!("{table}");
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 14), "short");
        assert_eq!(truncate("a very long task title", 8), "a very …");
    }
}
