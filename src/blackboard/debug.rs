//! Diagnostic snapshots of a blackboard scope.

use serde::Serialize;

/// One line of a blackboard dump.
///
/// Remapped keys appear with `remapped_to` set; their local entry (if any)
/// is only a placeholder, so `value` stays `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub key: String,
    pub locked_type: Option<String>,
    pub value_type: Option<String>,
    /// Rendered value, when the stored type can be rendered.
    pub value: Option<String>,
    pub remapped_to: Option<String>,
}

/// Render snapshots as the text returned by `Blackboard::debug_dump`.
pub(crate) fn render_dump(snapshots: &[EntrySnapshot]) -> String {
    let mut out = String::new();

    for snap in snapshots.iter().filter(|s| s.remapped_to.is_none()) {
        let locked = snap.locked_type.as_deref().unwrap_or("-");
        let value = match (&snap.value_type, &snap.value) {
            (Some(_), Some(rendered)) => rendered.clone(),
            (Some(ty), None) => format!("<{}>", ty),
            (None, _) => "<empty>".to_string(),
        };
        out.push_str(&format!("{} ({}) = {}\n", snap.key, locked, value));
    }

    for snap in snapshots {
        if let Some(external) = &snap.remapped_to {
            out.push_str(&format!(
                "[{}] remapped to port of parent tree [{}]\n",
                snap.key, external
            ));
        }
    }

    out
}
