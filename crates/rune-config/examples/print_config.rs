/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune-input.toml plus RUNE_INPUT_* overrides
    let config = rune_config::RuneInputConfig::load();

    println!("=== Rune Input Configuration ===\n");

    println!("Style:");
    println!("  Size: {} x {:?}", config.style.width, config.style.height);
    println!("  Padding: {}", config.style.padding);
    println!(
        "  Border: {}px {} radius {}",
        config.style.border_width,
        config.style.border_color,
        config.style.border_radius.to_css()
    );
    println!("  Background: {}", config.style.background_color);
    println!("  Box Shadow: {:?}", config.style.box_shadow);
    println!("  Inner Shadow: {:?}", config.style.inner_shadow);
    println!("  Resolution: {}", config.style.resolution);
    println!();

    println!("Text:");
    println!("  Font: {}", config.style.text.font);
    println!("  Fill: {}", config.style.text.fill);
    println!("  Align: {}", config.style.text.align);
    println!("  Line Height: {}", config.style.text.line_height);
    println!();

    println!("Input:");
    println!("  Type: {:?}", config.input.input_type);
    println!("  Placeholder: {:?}", config.input.placeholder);
    println!("  Max Length: {:?}", config.input.max_length);
    println!();

    println!("Textarea:");
    println!("  Placeholder: {:?}", config.textarea.placeholder);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
