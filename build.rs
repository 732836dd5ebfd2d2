use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata backs `academy-rs --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
