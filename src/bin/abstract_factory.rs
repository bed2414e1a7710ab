use anyhow::Result;
use colored::Colorize;
use design_patterns::creational::abstract_factory::{LlmProviderFactory, Provider};
use design_patterns::logging;

fn run(factory: &dyn LlmProviderFactory, prompt: &str) {
    let client = factory.create_client();
    let config = client.config();
    println!("  model {} at {}", config.model.cyan(), config.base_url);
    println!("  {}", client.generate(prompt));
}

fn main() -> Result<()> {
    logging::init();
    println!("{}", "=== Abstract Factory: LLM providers ===".bold());

    let prompt = "Explain the abstract factory pattern in simple terms.";
    for provider in Provider::ALL {
        println!("\n{}", provider.to_string().bold());
        run(provider.factory().as_ref(), prompt);
    }

    let requested = std::env::args().nth(1).unwrap_or_else(|| "anthropic".to_string());
    let provider: Provider = requested.parse()?;
    println!("\n{} {provider}", "Selected from command line:".green());
    run(provider.factory().as_ref(), "What is the capital of France?");
    Ok(())
}
