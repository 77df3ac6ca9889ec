/// Default `User-Agent` header sent with API and image requests.
pub(crate) fn default_user_agent() -> String {
    format!("imgur-dl/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_carries_crate_version() {
        let agent = default_user_agent();
        assert!(agent.starts_with("imgur-dl/"));
        assert!(agent.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
