use std::cmp::Ordering;

use crate::{
    domain::chat::ContactSummary,
    usecases::contracts::{AutomationClient, AutomationError},
};

/// One-to-one chats with a known name, sorted by name.
pub async fn list_contacts(
    client: &dyn AutomationClient,
) -> Result<Vec<ContactSummary>, AutomationError> {
    let chats = client.get_chats().await?;

    let mut contacts: Vec<ContactSummary> = chats
        .iter()
        .filter(|chat| !chat.is_group)
        .filter_map(|chat| {
            chat.explicit_name().map(|name| ContactSummary {
                id: chat.id.serialized.clone(),
                name: name.to_owned(),
            })
        })
        .collect();

    contacts.sort_by(|left, right| compare_names(&left.name, &right.name));
    Ok(contacts)
}

/// Case-insensitive collation with a stable tie-break on the raw text.
fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
