use crate::core::config::data::Config;
use crate::core::constants::DEFAULT_BACKEND_URL;

impl Config {
    pub fn print_all(&self) {
        print!("{}", self.describe());
    }

    pub fn describe(&self) -> String {
        let mut out = String::from("Current configuration:\n");
        match &self.backend_url {
            Some(url) => out.push_str(&format!("  backend-url: {url}\n")),
            None => out.push_str(&format!(
                "  backend-url: (unset, using {DEFAULT_BACKEND_URL})\n"
            )),
        }
        match &self.greeting {
            Some(greeting) => out.push_str(&format!("  greeting: {greeting}\n")),
            None => out.push_str("  greeting: (unset)\n"),
        }
        out
    }
}
