use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "site-gateway")]
#[command(about = "Turns a website description into a deployed static site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Generative provider credential
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    // Generative provider base url
    #[arg(long, default_value = "https://generativelanguage.googleapis.com")]
    pub gemini_url: String,

    // Model used for every generation call
    #[arg(long, default_value = "gemini-1.5-flash")]
    pub gemini_model: String,

    // Deployment provider credential
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    pub vercel_token: Option<String>,

    // Deployment provider base url
    #[arg(long, default_value = "https://api.vercel.com")]
    pub vercel_url: String,

    // Deployment name prefix, a millisecond timestamp is appended
    #[arg(long, default_value = "ai-site-")]
    pub name_prefix: String,

    // Deployment environment tag
    #[arg(long, default_value = "production")]
    pub target: String,
}

/// Everything a request needs to reach both providers.
///
/// Read-only once the server is running. Credentials stay optional so a
/// missing one fails the request that needs it instead of the whole process.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_url: String,
    pub gemini_model: String,
    pub vercel_token: Option<String>,
    pub vercel_url: String,
    pub name_prefix: String,
    pub target: String,
}

impl From<&Args> for ProviderConfig {
    fn from(args: &Args) -> Self {
        Self {
            gemini_api_key: non_empty(args.gemini_api_key.as_deref()),
            gemini_url: args.gemini_url.trim_end_matches('/').to_string(),
            gemini_model: args.gemini_model.clone(),
            vercel_token: non_empty(args.vercel_token.as_deref()),
            vercel_url: args.vercel_url.trim_end_matches('/').to_string(),
            name_prefix: args.name_prefix.clone(),
            target: args.target.clone(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_providers() {
        let args = Args::parse_from(["site-gateway"]);
        let config = ProviderConfig::from(&args);

        assert_eq!(args.port, 8080);
        assert_eq!(config.gemini_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.vercel_url, "https://api.vercel.com");
        assert_eq!(config.target, "production");
        assert_eq!(config.name_prefix, "ai-site-");
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        let args = Args::parse_from([
            "site-gateway",
            "--gemini-api-key",
            "  ",
            "--vercel-token",
            "tok",
            "--vercel-url",
            "http://localhost:9000/",
        ]);
        let config = ProviderConfig::from(&args);

        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.vercel_token.as_deref(), Some("tok"));
        assert_eq!(config.vercel_url, "http://localhost:9000");
    }
}
