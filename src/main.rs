use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, info};

use produtos_console::client::ProductClient;
use produtos_console::config;
use produtos_console::display::{format_brl, product_table};
use produtos_console::events::{event_channel, Event};
use produtos_console::models::ProductId;
use produtos_console::prompt::StdinPrompt;
use produtos_console::viewmodel::{
    DeleteOutcome, EditingSession, Field, ListPhase, ProductFormModel, ProductListModel,
    SubmitOutcome,
};

/// Console front-end for a remote product catalog service.
#[derive(Debug, Parser)]
#[command(name = "produtos-console", version, about)]
struct Cli {
    /// Base URL of the product collection, e.g. http://localhost:8080/api/produtos
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter directive, e.g. "info" or "produtos_console=debug"
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config().context("failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        cfg.api_base_url = base_url;
    }
    if let Some(log_level) = cli.log_level {
        cfg.log_level = log_level;
    }
    config::init_tracing(&cfg.log_level, cli.json_logs || cfg.log_json);

    info!(
        "Starting product console against {} ({})",
        cfg.api_base_url, cfg.environment
    );

    let client = ProductClient::new(&cfg.api_base_url)
        .with_context(|| format!("invalid base URL: {}", cfg.api_base_url))?;
    let (events, rx) = event_channel(32);

    let mut shell = Shell {
        list: ProductListModel::new(client.clone(), events.clone(), Arc::new(StdinPrompt)),
        form: ProductFormModel::new(client, events),
        events: rx,
    };
    shell.run().await
}

/// Interactive shell wiring the two view-models together: edit requests
/// from the list stage the form, saves from the form refresh the list.
struct Shell {
    list: ProductListModel,
    form: ProductFormModel,
    events: mpsc::Receiver<Event>,
}

impl Shell {
    async fn run(&mut self) -> anyhow::Result<()> {
        println!("Product catalog console. Type \"help\" for commands.");
        println!("Loading products...");
        self.list.refresh().await;
        self.print_list();

        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            self.drain_events().await;

            print!("{}", self.prompt_text());
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if !self.dispatch(line.trim()).await {
                break;
            }
        }
        Ok(())
    }

    /// Applies queued view-model events before the next prompt.
    async fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Event::EditRequested(id) => {
                    if self.form.enter_edit(id).await {
                        println!("Editing product {}. Current values:", id);
                        self.print_form();
                    } else if let Some(error) = self.form.error() {
                        println!("{}", error);
                    }
                }
                Event::Saved(id) => {
                    debug!("Product {} saved, refreshing the list", id);
                    self.list.refresh().await;
                    self.print_list();
                }
                Event::Cancelled => debug!("Form dismissed"),
            }
        }
    }

    async fn dispatch(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "list" | "ls" => self.print_list(),
            "refresh" => {
                println!("Loading products...");
                self.list.refresh().await;
                self.print_list();
            }
            "new" => {
                self.form.enter_create();
                println!("Creating a new product. Use \"set\" to fill the fields.");
            }
            "edit" => self.cmd_edit(rest).await,
            "set" => self.cmd_set(rest),
            "show" => self.print_form(),
            "submit" => self.cmd_submit().await,
            "cancel" => {
                self.form.cancel().await;
                println!("Edit cancelled");
            }
            "delete" => self.cmd_delete(rest).await,
            "help" => print_help(),
            "quit" | "exit" => return false,
            other => println!("Unknown command \"{}\". Type \"help\" for commands.", other),
        }
        true
    }

    async fn cmd_edit(&mut self, rest: &str) {
        let Ok(id) = rest.parse::<ProductId>() else {
            println!("Usage: edit <id>");
            return;
        };
        if !self.list.request_edit(id).await {
            println!("No product with id {} in the list. Try \"refresh\".", id);
        }
    }

    fn cmd_set(&mut self, rest: &str) {
        let (field, value) = match rest.split_once(char::is_whitespace) {
            Some((field, value)) => (field, value.trim()),
            None => (rest, ""),
        };
        let field = match field {
            "name" => Field::Name,
            "price" => Field::Price,
            "stock" => Field::StockQuantity,
            _ => {
                println!("Usage: set <name|price|stock> <value>");
                return;
            }
        };
        self.form.update_field(field, value);
    }

    async fn cmd_submit(&mut self) {
        match self.form.submit().await {
            SubmitOutcome::Created(product) => {
                println!(
                    "Created product {} \"{}\" at {}",
                    product.id,
                    product.name,
                    format_brl(product.price)
                );
            }
            SubmitOutcome::Updated(product) => {
                println!("Updated product {} \"{}\"", product.id, product.name);
            }
            SubmitOutcome::Rejected => {
                if let Some(error) = self.form.error() {
                    println!("{}", error);
                }
            }
        }
    }

    async fn cmd_delete(&mut self, rest: &str) {
        let Ok(id) = rest.parse::<ProductId>() else {
            println!("Usage: delete <id>");
            return;
        };
        match self.list.request_delete(id).await {
            DeleteOutcome::UnknownId => {
                println!("No product with id {} in the list. Try \"refresh\".", id);
            }
            DeleteOutcome::Declined => println!("Delete cancelled"),
            DeleteOutcome::Deleted => {
                println!("Product deleted");
                self.print_list();
            }
            DeleteOutcome::Failed => {
                if let Some(error) = self.list.error_message() {
                    println!("{}", error);
                }
            }
        }
    }

    fn prompt_text(&self) -> String {
        match self.form.session() {
            EditingSession::Creating => "> ".to_string(),
            EditingSession::Editing(id) => format!("edit {}> ", id),
        }
    }

    fn print_list(&self) {
        match self.list.phase() {
            ListPhase::Failed(message) => {
                println!("{}", message);
                println!("Check the service and run \"refresh\" to try again.");
            }
            _ => println!("{}", product_table(self.list.products())),
        }
    }

    fn print_form(&self) {
        let fields = self.form.fields();
        match self.form.session() {
            EditingSession::Creating => println!("Form (new product)"),
            EditingSession::Editing(id) => println!("Form (product {})", id),
        }
        println!("  name:  {}", fields.name);
        println!("  price: {}", fields.price);
        println!("  stock: {}", fields.stock_quantity);
        if let Some(error) = self.form.error() {
            println!("  error: {}", error);
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list | ls              show the cached product table");
    println!("  refresh                refetch the catalog from the service");
    println!("  new                    start a blank create form");
    println!("  edit <id>              stage a listed product for editing");
    println!("  set <field> <value>    fill a form field (name, price, stock)");
    println!("  show                   print the staged form");
    println!("  submit                 validate and save the form");
    println!("  cancel                 abandon the form");
    println!("  delete <id>            delete a listed product (asks first)");
    println!("  quit | exit            leave the console");
}
