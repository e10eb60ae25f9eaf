use pcast_core::constants::ADDENTRY_VIEW;

/// View page of a placement, anchored at one episode
pub fn entry_link(cmid: i64, episode_id: i64) -> String {
    format!(
        "view.php?id={}&mode={}&hook={}",
        cmid, ADDENTRY_VIEW, episode_id
    )
}

/// View page of a placement without an anchor
pub fn module_link(cmid: i64) -> String {
    format!("view.php?id={}", cmid)
}
