use colored::Colorize;
use design_patterns::logging;
use design_patterns::structural::decorator::{
    AuthMiddleware, BaseHandler, LoggingMiddleware, RateLimitMiddleware, Request, RequestHandler, Response,
};
use serde_json::json;

fn print_response(response: &Response) {
    let status = response.status_code.to_string();
    let status = if response.status_code < 400 { status.green() } else { status.red() };
    println!("  {status} {}", response.body);
}

fn main() {
    logging::init();
    println!("{}", "=== Decorator: request pipeline ===".bold());

    let request = Request::new("POST", "/api/test", json!({"data": "test"}))
        .with_header("Content-Type", "application/json");
    let authorized = request.clone().with_header("Authorization", "Bearer valid-token");

    println!("\n{}", "Base handler".cyan());
    print_response(&BaseHandler.handle(&request));

    println!("\n{}", "Auth middleware".cyan());
    let auth = AuthMiddleware::new(BaseHandler);
    print_response(&auth.handle(&request));
    print_response(&auth.handle(&authorized));

    println!("\n{}", "Rate limit of 2".cyan());
    let limited = RateLimitMiddleware::with_limit(BaseHandler, 2);
    for _ in 0..3 {
        print_response(&limited.handle(&authorized));
    }

    println!("\n{}", "Auth -> RateLimit -> Logging -> Base".cyan());
    let pipeline = AuthMiddleware::new(RateLimitMiddleware::with_limit(LoggingMiddleware::new(BaseHandler), 2));
    print_response(&pipeline.handle(&authorized));
}
