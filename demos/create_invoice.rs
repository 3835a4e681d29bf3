//! Create-and-send invoice example.
//!
//! This example exchanges client credentials for a token, creates an
//! invoice, sends it to the payer and fetches its QR code.
//!
//! Run with: cargo run --example create_invoice

use hg_api_client::models::{
    ClientCredentials, InvoiceItem, NewInvoice, OutletAddress, QrCodeOptions, Service,
    ServiceProvider, StoreInfo,
};
use hg_api_client::{HgClient, InvoiceId};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> hg_api_client::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get settings from environment variables
    let base_url = std::env::var("HG_API_URL")
        .expect("HG_API_URL environment variable required");
    let client_id: i64 = std::env::var("HG_CLIENT_ID")
        .expect("HG_CLIENT_ID environment variable required")
        .parse()
        .expect("HG_CLIENT_ID must be an integer");
    let client_secret = std::env::var("HG_CLIENT_SECRET")
        .expect("HG_CLIENT_SECRET environment variable required");

    let client = HgClient::new(base_url)?;
    let credentials = ClientCredentials::new(client_id, client_secret, 42, 7);

    println!("Requesting token...");
    let Some(token) = client.token().get(&credentials).await? else {
        println!("Authorization server returned no access_token");
        return Ok(());
    };

    let invoice = NewInvoice {
        number: "10001".to_string(),
        service_provider: ServiceProvider { id: 42, name: "Acme".to_string() },
        service: Service { id: 7, name: "Delivery".to_string() },
        address: OutletAddress {
            country: "BY".to_string(),
            line1: "Nezavisimosti 1".to_string(),
            city: "Minsk".to_string(),
            full_address: "BY, Minsk, Nezavisimosti 1".to_string(),
        },
        store: StoreInfo {
            name: "Acme Store".to_string(),
            locality_name: "Minsk".to_string(),
            locality_code: "17030".to_string(),
            city: "Minsk".to_string(),
            locality_city: "Minsk".to_string(),
        },
        items: vec![
            InvoiceItem::new("Pizza", dec!(1), dec!(25.50)).with_description("Margherita"),
        ],
        terms_of_days: 3,
    };

    let created = client.invoices().create(&token, &invoice).await?;
    let Some(id) = created.as_str().map(InvoiceId::new) else {
        println!("Unexpected create response: {:?}", created);
        return Ok(());
    };
    println!("Created invoice {}", id);

    client.invoices().set_active(&token, &id).await?;
    println!("Invoice sent");

    let qr = client
        .invoices()
        .get_qrcode(&token, &id, QrCodeOptions::default())
        .await?;
    match qr.as_str() {
        Some(result) => println!("QR code: {}", result),
        None => println!("QR code response: {:?}", qr),
    }

    println!("\nDone!");
    Ok(())
}
