use crate::events::FeedEvent;

/// One-line chat summary of a push event.
///
/// Returns `None` when the push carries no commits, since there is no
/// message to quote.
pub fn push_summary(event: &FeedEvent) -> Option<String> {
    let commits = event.commits();
    let first = commits.first()?;
    let actor = &event.actor.login;
    let repo = &event.repo.name;
    let subject = first.subject();

    Some(match commits.len() {
        1 => format!("{actor} pushed to [{repo}] \"{subject}\""),
        n => format!(
            "{actor} pushed [{repo}] \"{subject}\" alongside {} other commit(s)",
            n - 1
        ),
    })
}
