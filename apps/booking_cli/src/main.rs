use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{load_settings, ReservationApi, ReservationClient};
use controller::{
    ChannelNavigator, FormMode, LocalClock, ReservationForm, ReservationList, SubmitOutcome,
};
use shared::domain::{FormField, Reservation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage restaurant reservations against the booking backend")]
struct Args {
    /// Overrides the configured backend base address.
    #[arg(long, env = "BOOKING_API_URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all reservations.
    List,
    /// Show one reservation.
    Show { id: String },
    /// Create a reservation.
    Create(FieldArgs),
    /// Edit a reservation; omitted fields keep their current values.
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a reservation.
    Delete { id: String },
    /// Check that the backend answers.
    Health,
}

#[derive(ClapArgs, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// HH:MM
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    message: Option<String>,
}

impl FieldArgs {
    fn entries(&self) -> impl Iterator<Item = (FormField, &str)> {
        [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Phone, &self.phone),
            (FormField::Date, &self.date),
            (FormField::Time, &self.time),
            (FormField::Message, &self.message),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let client = Arc::new(
        ReservationClient::new(&settings).context("failed to configure reservation client")?,
    );

    match args.command {
        Command::List => list(client).await,
        Command::Show { id } => show(client, &id).await,
        Command::Create(fields) => {
            submit_form(client, None, &fields, settings.success_redirect_delay()).await
        }
        Command::Edit { id, fields } => {
            submit_form(client, Some(&id), &fields, settings.success_redirect_delay()).await
        }
        Command::Delete { id } => delete(client, &id).await,
        Command::Health => {
            client
                .health()
                .await
                .with_context(|| format!("backend at {} is not healthy", client.base_url()))?;
            println!("Backend at {} is healthy", client.base_url());
            Ok(())
        }
    }
}

fn print_reservation(reservation: &Reservation) {
    let id = reservation
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".into());
    println!(
        "#{id} {} <{}> {} on {} at {}",
        reservation.name,
        reservation.email,
        reservation.phone,
        reservation.date.format("%Y-%m-%d"),
        reservation.time.format("%H:%M"),
    );
    if !reservation.message.is_empty() {
        println!("    {}", reservation.message);
    }
}

async fn list(client: Arc<ReservationClient>) -> Result<()> {
    let list = ReservationList::open(client).await;
    if let Some(err) = list.ui_error() {
        bail!("{} ({})", err.message(), err.detail());
    }
    if list.is_empty() {
        println!("No reservations found");
    }
    for reservation in list.reservations() {
        print_reservation(reservation);
    }
    Ok(())
}

async fn show(client: Arc<ReservationClient>, raw_id: &str) -> Result<()> {
    let id = FormMode::from_route(Some(raw_id))?
        .reservation_id()
        .ok_or_else(|| anyhow!("a reservation id is required"))?;
    let reservation = client
        .get(id)
        .await
        .with_context(|| format!("failed to fetch reservation {id}"))?;
    print_reservation(&reservation);
    Ok(())
}

async fn delete(client: Arc<ReservationClient>, raw_id: &str) -> Result<()> {
    let id = FormMode::from_route(Some(raw_id))?
        .reservation_id()
        .ok_or_else(|| anyhow!("a reservation id is required"))?;
    let mut list = ReservationList::new(client);
    list.request_delete(id);
    list.confirm_delete().await;
    if let Some(err) = list.ui_error() {
        bail!("{} ({})", err.message(), err.detail());
    }
    println!("Reservation {id} deleted");
    Ok(())
}

async fn submit_form(
    client: Arc<ReservationClient>,
    route_id: Option<&str>,
    fields: &FieldArgs,
    redirect_delay: Duration,
) -> Result<()> {
    let mode = FormMode::from_route(route_id)?;
    let (navigator, mut navigation) = ChannelNavigator::new();
    let mut form = ReservationForm::open(
        mode,
        client,
        Arc::new(navigator),
        Arc::new(LocalClock),
        redirect_delay,
    )
    .await;
    if let Some(err) = form.ui_error() {
        bail!("{}: {} ({})", err.message(), err.hint(), err.detail());
    }

    for (field, value) in fields.entries() {
        form.set_field(field, value);
    }

    match form.submit().await {
        SubmitOutcome::Saved(saved) => {
            if let Some(message) = form.success_message() {
                println!("{message}");
            }
            print_reservation(&saved);
            // Let the delayed hand-off back to the list complete.
            navigation.recv().await;
            Ok(())
        }
        SubmitOutcome::Invalid => {
            for (field, message) in form.errors().iter() {
                eprintln!("  {field}: {message}");
            }
            bail!("reservation not saved: {} field(s) need attention", form.errors().len())
        }
        SubmitOutcome::Failed(kind) => {
            let message = form.error_message().unwrap_or("Failed to save reservation");
            bail!("{message}: {}", kind.hint())
        }
        SubmitOutcome::Ignored => bail!("form was not ready for submission"),
    }
}
