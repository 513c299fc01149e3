//! Plain-text rendering of rotations for chat messages and the CLI

use shared::MemberId;

use super::state::{Rotation, MIN_START_MEMBERS};

/// Join members as `a`, `a and b`, or `a, b, and c`
pub fn format_member_list(members: &[MemberId]) -> String {
    match members {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => {
            let head: Vec<String> = rest.iter().map(ToString::to_string).collect();
            format!("{}, and {last}", head.join(", "))
        }
    }
}

/// Status summary shown while a rotation collects members or after it starts
pub fn rotation_summary(rotation: &Rotation) -> String {
    let mut lines = vec![format!(
        "{} started {} {} rotation.",
        rotation.initiator_id,
        rotation.mode.article(),
        rotation.mode
    )];

    if rotation.members.is_empty() {
        lines.push("Nobody has joined yet.".to_string());
    } else {
        lines.push(format!(
            "Currently includes: {}.",
            format_member_list(&rotation.members)
        ));
    }

    match &rotation.assignments {
        Some(assignments) => {
            lines.push("Assignments:".to_string());
            lines.extend(assignments.iter().map(|pair| format!("  {pair}")));
        }
        None if !rotation.can_start() => lines.push(format!(
            "Cannot start until at least {MIN_START_MEMBERS} members have joined."
        )),
        None => {}
    }

    lines.join("\n")
}
