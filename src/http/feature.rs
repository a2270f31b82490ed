use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// Tags the user agent with the command family that issued the request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Feature {
    Versions,
}

pub(crate) fn headers(feature: Option<Feature>) -> HeaderMap {
    let mut headers = HeaderMap::default();
    if let Ok(agent) = HeaderValue::from_str(&get_user_agent(feature)) {
        headers.insert(USER_AGENT, agent);
    }
    headers
}

fn get_user_agent(feature: Option<Feature>) -> String {
    let version = if cfg!(debug_assertions) {
        "dev"
    } else {
        env!("CARGO_PKG_VERSION")
    };

    let mut agent = format!("wrangler/{}", version);
    if let Some(feature) = feature {
        agent.push('/');
        let feat = format!("{:?}", feature).to_lowercase();
        agent.push_str(&feat);
    }
    agent
}
