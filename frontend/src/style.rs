use shared::{DueLabel, Priority};

pub fn priority_dot(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "bg-ctp-red",
        Priority::Medium => "bg-ctp-yellow",
        Priority::Low => "bg-ctp-overlay0",
    }
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High Priority",
        Priority::Medium => "Medium Priority",
        Priority::Low => "Low Priority",
    }
}

pub fn due_badge(label: &DueLabel) -> &'static str {
    match label {
        DueLabel::Overdue => "bg-ctp-red/20 text-ctp-red",
        DueLabel::Today => "bg-ctp-yellow/20 text-ctp-yellow",
        DueLabel::Upcoming(_) => "bg-ctp-surface2 text-ctp-subtext1",
    }
}

pub fn toggle_chip(active: bool) -> &'static str {
    if active {
        "bg-ctp-blue text-ctp-base"
    } else {
        "text-ctp-subtext0 hover:text-ctp-text hover:bg-ctp-surface1"
    }
}
