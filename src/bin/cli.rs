use clap::{Parser, Subcommand};
use todo_api::{
    config::AppConfig,
    db,
    models::{CreateTodoRequest, CreateUserRequest, UpdateTodoRequest},
    AppState,
};

#[derive(Parser)]
#[command(name = "todo-api-cli")]
#[command(about = "CLI tool for managing todo-api data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the status type and tables if they do not exist
    InitDb,

    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// To-do item commands
    Todo {
        #[command(subcommand)]
        command: TodoCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List all users
    List,

    /// Create a new user
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Delete a user
    Delete {
        #[arg(long)]
        id: i32,
    },
}

#[derive(Subcommand)]
enum TodoCommands {
    /// List all to-do items
    List,

    /// Create a to-do item
    Create {
        #[arg(short, long)]
        title: String,

        /// One of "To Do", "In Progress", "Done"
        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Move an item to another status
    SetStatus {
        #[arg(long)]
        id: i32,

        #[arg(short, long)]
        status: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = AppConfig::from_env();
    let pool = db::create_pool(&config.database).await?;
    db::bootstrap_schema(&pool).await?;

    let state = AppState::from_pool(pool);

    match cli.command {
        Commands::InitDb => {
            println!("✅ Schema is up to date");
        }

        Commands::User { command } => match command {
            UserCommands::List => match state.user_service.list_users().await {
                Ok(users) => {
                    if users.is_empty() {
                        println!("No users found.");
                    } else {
                        println!("{:<5} {:<30} {:<40}", "ID", "Name", "Email");
                        println!("{}", "-".repeat(75));
                        for user in users {
                            println!("{:<5} {:<30} {:<40}", user.id, user.name, user.email);
                        }
                    }
                }
                Err(err) => {
                    eprintln!("❌ Failed to list users: {}", err);
                    std::process::exit(1);
                }
            },

            UserCommands::Create {
                name,
                email,
                password,
            } => {
                let request = CreateUserRequest {
                    name: Some(name),
                    email: Some(email),
                    password,
                };

                match state.user_service.create_user(request).await {
                    Ok(user) => {
                        println!("✅ User created successfully!");
                        println!("  ID: {}", user.id);
                        println!("  Name: {}", user.name);
                        println!("  Email: {}", user.email);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to create user: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            UserCommands::Delete { id } => match state.user_service.delete_user(id).await {
                Ok(user) => {
                    println!("✅ User '{}' deleted successfully!", user.email);
                }
                Err(err) => {
                    eprintln!("❌ Failed to delete user: {}", err);
                    std::process::exit(1);
                }
            },
        },

        Commands::Todo { command } => match command {
            TodoCommands::List => match state.todo_service.list_todos().await {
                Ok(todos) => {
                    if todos.is_empty() {
                        println!("No to-do items found.");
                    } else {
                        println!("{:<5} {:<40} {:<12} {:<20}", "ID", "Title", "Status", "Created");
                        println!("{}", "-".repeat(80));
                        for todo in todos {
                            println!(
                                "{:<5} {:<40} {:<12} {:<20}",
                                todo.id,
                                todo.title,
                                todo.status,
                                todo.date.format("%Y-%m-%d %H:%M")
                            );
                        }
                    }
                }
                Err(err) => {
                    eprintln!("❌ Failed to list to-do items: {}", err);
                    std::process::exit(1);
                }
            },

            TodoCommands::Create {
                title,
                status,
                description,
            } => {
                let request = CreateTodoRequest {
                    title: Some(title),
                    status: status.map(Some),
                    description,
                };

                match state.todo_service.create_todo(request).await {
                    Ok(todo) => {
                        println!("✅ To-do item created successfully!");
                        println!("  ID: {}", todo.id);
                        println!("  Title: {}", todo.title);
                        println!("  Status: {}", todo.status);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to create to-do item: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            TodoCommands::SetStatus { id, status } => {
                let request = UpdateTodoRequest {
                    status: Some(Some(status)),
                    ..Default::default()
                };

                match state.todo_service.update_todo(id, request).await {
                    Ok(todo) => {
                        println!("✅ To-do item {} is now '{}'", todo.id, todo.status);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to update to-do item: {}", err);
                        std::process::exit(1);
                    }
                }
            }
        },
    }

    Ok(())
}
