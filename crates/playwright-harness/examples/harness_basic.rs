// Harness example - Drive a small form through the harness environment
//
// Shows: loader creation, find_all, scoped child loaders, typing with
// modifiers, reading properties and dimensions

use playwright_harness::{
    ElementLocator, HarnessEnvironment, HarnessEnvironmentOptions, KeyToken, ModifierKeys,
    PageLocator, PlaywrightHarnessEnvironment, TestElement, TestKey,
};
use playwright_rs::Playwright;

const PAGE: &str = "data:text/html,<html><body>\
    <form id='signup'>\
      <input id='email' class='field required' />\
      <button type='button' hidden>Hidden</button>\
      <button type='button' onclick=\"this.textContent='Sent'\">Send</button>\
    </form>\
    </body></html>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let playwright = Playwright::launch().await?;
    let browser = playwright.chromium().launch().await?;
    let page = browser.new_page().await?;
    page.goto(PAGE, None).await?;

    // Only visible elements are returned by this loader
    let options = HarnessEnvironmentOptions::<PageLocator>::builder()
        .query_fn(|selector, root| root.locator(&format!("{selector} >> visible=true")))
        .build();
    let loader = PlaywrightHarnessEnvironment::loader(&page, Some(options)).await?;

    // Scope every further query to the form
    let form = loader.child_loader("#signup").await?;

    let email = &form.find_all("#email").await?[0];
    email.send_keys(&[KeyToken::from("ada@example.com")]).await?;
    println!("Typed: {}", email.get_property("value").await?);

    // Select everything and delete it
    let control = ModifierKeys {
        control: true,
        ..Default::default()
    };
    email
        .send_keys_with_modifiers(control, &[KeyToken::from("a")])
        .await?;
    email.send_keys(&[KeyToken::from(TestKey::Backspace)]).await?;
    println!("After clearing: {:?}", email.get_property("value").await?);

    println!("Required: {}", email.has_class("required").await?);
    println!("Dimensions: {:?}", email.get_dimensions().await?);

    let buttons = form.find_all("button").await?;
    println!("Visible buttons: {}", buttons.len());
    if let Some(send) = buttons.first() {
        send.click(None, ModifierKeys::NONE).await?;
        println!("Button text: {}", send.text(None).await?);
    }

    browser.close().await?;
    Ok(())
}
