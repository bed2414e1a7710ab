use colored::Colorize;
use design_patterns::behavioral::chain_of_responsibility::{default_chain, make_request, Handler, VALID_TOKEN};
use design_patterns::logging;

fn main() {
    logging::init();
    println!("{}", "=== Chain of Responsibility: HTTP middleware ===".bold());

    let chain = default_chain();
    let scenarios = [
        ("Valid token, admin role required", make_request("/admin/dashboard", Some(VALID_TOKEN), Some("admin"))),
        ("Valid token, no role required", make_request("/profile", Some(VALID_TOKEN), None)),
        ("Invalid token", make_request("/admin/dashboard", Some("invalid_token"), Some("admin"))),
        ("Missing token", make_request("/profile", None, None)),
        ("Valid token, wrong role", make_request("/reports", Some(VALID_TOKEN), Some("editor"))),
    ];

    for (label, request) in scenarios {
        println!("\n{}", label.cyan());
        match chain.handle(request).response() {
            Some(response) if response.status_code == 200 => {
                println!("  {} {}", response.status_code.to_string().green(), response.body)
            }
            Some(response) => println!("  {} {}", response.status_code.to_string().red(), response.body),
            None => println!("  {}", "no handler answered".yellow()),
        }
    }
}
