// Slack reply templates

use donut_domain::LeaderboardEntry;

pub const ACK_TEXT: &str = "Check #donuts for the result.";
pub const STORE_FAILURE: &str = "Something went wrong talking to the donut store.";
pub const SELF_REPORT: &str = "You can't report yourself bringing donuts.";
pub const NO_HISTORY: &str = "Nobody has been donutted yet.";
pub const NO_DEBTS: &str = "Nobody owes donuts right now.";

pub fn help() -> String {
    [
        "Donut Bot commands:",
        "`/donut me` - you left your computer unlocked, you owe donuts",
        "`/donut shame` - show who owes donuts and the hall of shame",
        "`/donut @someone brought donuts` - report that someone paid up",
    ]
    .join("\n")
}

pub fn donutted(target: &str) -> String {
    format!(
        ":doughnut: {} has been donutted! Bring some donuts for the team.",
        target
    )
}

pub fn cooldown(target: &str) -> String {
    format!(
        "{} was donutted less than 5 minutes ago, wait before donutting again.",
        target
    )
}

pub fn not_owed(name: &str) -> String {
    format!("{} doesn't owe any donuts.", name)
}

pub fn brought(reporter: &str, name: &str) -> String {
    format!("{} reports that {} brought donuts! :tada:", reporter, name)
}

pub fn shame(latest: Option<&str>, debtors: &[String], board: &[LeaderboardEntry]) -> String {
    let latest_line = match latest {
        Some(name) => format!("Most recently donutted: {}", name),
        None => NO_HISTORY.to_string(),
    };
    let debt_line = if debtors.is_empty() {
        NO_DEBTS.to_string()
    } else {
        format!("Still owes donuts: {}", debtors.join(", "))
    };
    format!(
        "{}\n{}\n*Hall of shame*\n```\n{}```",
        latest_line,
        debt_line,
        render_leaderboard(board)
    )
}

/// Monospace two-column table, name left-aligned and count right-aligned.
pub fn render_leaderboard(board: &[LeaderboardEntry]) -> String {
    let name_width = board
        .iter()
        .map(|entry| entry.display_name.chars().count())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(0);
    let count_width = board
        .iter()
        .map(|entry| entry.count.to_string().len())
        .chain(std::iter::once("count".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<nw$} | {:>cw$}\n",
        "name",
        "count",
        nw = name_width,
        cw = count_width
    ));
    out.push_str(&format!(
        "{}-+-{}\n",
        "-".repeat(name_width),
        "-".repeat(count_width)
    ));
    for entry in board {
        out.push_str(&format!(
            "{:<nw$} | {:>cw$}\n",
            entry.display_name,
            entry.count,
            nw = name_width,
            cw = count_width
        ));
    }
    out
}
