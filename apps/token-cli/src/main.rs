//! Developer token generator.
//!
//! Prints a signed bearer token for one of the predefined test callers:
//!
//! ```text
//! token-cli [user|admin|other]
//! ```

use std::process::ExitCode;

use blog_core::domain::Role;
use blog_core::ports::TokenService;
use blog_infra::JwtTokenService;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let profile = std::env::args().nth(1).unwrap_or_else(|| "user".to_string());

    let (user_id, email, role) = match profile.as_str() {
        "user" => ("normal-user-id", "user@example.com", Role::User),
        "admin" => ("admin-user-id", "admin@example.com", Role::Admin),
        "other" => ("other-user-id", "other@example.com", Role::User),
        _ => {
            eprintln!("Available token profiles:");
            eprintln!("- user  (regular user)");
            eprintln!("- admin (administrator)");
            eprintln!("- other (a second regular user)");
            eprintln!();
            eprintln!("Usage: token-cli [user|admin|other]");
            return ExitCode::FAILURE;
        }
    };

    let service = JwtTokenService::from_env();

    match service.generate_token(user_id, email, role) {
        Ok(token) => {
            println!();
            println!("=== Generated JWT ===");
            println!("User ID: {}", user_id);
            println!("Email:   {}", email);
            println!("Role:    {}", role);
            println!();
            println!("Token:");
            println!("{}", token);
            println!();
            println!("=== Usage ===");
            println!("Authorization: Bearer {}", token);
            println!("=====================");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to generate token: {}", e);
            ExitCode::FAILURE
        }
    }
}
