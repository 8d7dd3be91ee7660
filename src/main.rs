use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::*;
use dotenv::dotenv;
use human_panic::setup_panic;
use serde::Serialize;
use tracing::{debug, warn};

use rust_essay_system::config::AppConfig;
use rust_essay_system::errors::{EssaySystemError, Result};
use rust_essay_system::grading::DEFAULT_TEMPERATURE;
use rust_essay_system::models::criteria::requests::CreateCriterionRequest;
use rust_essay_system::models::essays::{entities::EssayStatus, requests::SubmitEssayRequest};
use rust_essay_system::models::gradings::requests::FinalizeGradingRequest;
use rust_essay_system::models::users::{entities::UserRole, requests::CreateUserRequest};
use rust_essay_system::runtime::lifetime::{self, startup::StartupContext};
use rust_essay_system::storage::Storage;
use rust_essay_system::utils::validate::validate_email;

#[derive(Debug, Clone)]
enum Cmd {
    /// 只评分，不写数据库
    Grade {
        title: String,
        criteria: Vec<i64>,
        temperature: f32,
        file: PathBuf,
    },
    Submit {
        student: i64,
        teacher: i64,
        title: String,
        file: PathBuf,
    },
    Regrade {
        files: Vec<PathBuf>,
    },
    Finalize {
        teacher: i64,
        score: f64,
        feedback: Option<String>,
        grading: i64,
    },
    Review {
        teacher: i64,
        status: EssayStatus,
        essay: i64,
    },
    AddUser {
        role: UserRole,
        email: String,
        name: String,
    },
    AddCriterion {
        max_score: f64,
        description: Option<String>,
        name: String,
    },
    DeleteCriterion {
        id: i64,
    },
}

fn options() -> Cmd {
    fn file() -> impl Parser<PathBuf> {
        positional::<PathBuf>("FILE").help("Path to the essay document")
    }

    fn title() -> impl Parser<String> {
        long("title").help("Essay title").argument::<String>("TITLE")
    }

    fn teacher() -> impl Parser<i64> {
        long("teacher").help("Teacher user id").argument::<i64>("ID")
    }

    let grade = {
        let title = title();
        let criteria = long("criterion")
            .help("Criterion id to grade against, repeatable; all criteria when omitted")
            .argument::<i64>("ID")
            .many();
        let temperature = long("temperature")
            .help("Sampling temperature")
            .argument::<f32>("X")
            .fallback(DEFAULT_TEMPERATURE);
        let file = file();
        construct!(Cmd::Grade {
            title,
            criteria,
            temperature,
            file
        })
        .to_options()
        .command("grade")
        .help("Grade a document and print the result")
    };

    let submit = {
        let student = long("student").help("Student user id").argument::<i64>("ID");
        let teacher = teacher();
        let title = title();
        let file = file();
        construct!(Cmd::Submit {
            student,
            teacher,
            title,
            file
        })
        .to_options()
        .command("submit")
        .help("Store an essay, grade it and create its grading record")
    };

    let regrade = {
        let files = positional::<PathBuf>("FILE")
            .help("Previously submitted document")
            .some("at least one file is required");
        construct!(Cmd::Regrade { files })
            .to_options()
            .command("regrade")
            .help("Grade previously submitted documents again")
    };

    let finalize = {
        let teacher = teacher();
        let score = long("score").help("Final score, 0 to 10").argument::<f64>("SCORE");
        let feedback = long("feedback")
            .help("Feedback for the student")
            .argument::<String>("TEXT")
            .optional();
        let grading = positional::<i64>("GRADING").help("Grading record id");
        construct!(Cmd::Finalize {
            teacher,
            score,
            feedback,
            grading
        })
        .to_options()
        .command("finalize")
        .help("Record the teacher's final score")
    };

    let review = {
        let teacher = teacher();
        let status = long("status")
            .help("pending, approved or rejected")
            .argument::<EssayStatus>("STATUS");
        let essay = positional::<i64>("ESSAY").help("Essay id");
        construct!(Cmd::Review {
            teacher,
            status,
            essay
        })
        .to_options()
        .command("review")
        .help("Approve or reject an essay")
    };

    let add_user = {
        let role = long("role")
            .help("student, teacher or admin")
            .argument::<UserRole>("ROLE");
        let email = long("email").help("Unique e-mail address").argument::<String>("EMAIL");
        let name = positional::<String>("NAME").help("Display name");
        construct!(Cmd::AddUser { role, email, name })
            .to_options()
            .command("add-user")
            .help("Create a user")
    };

    let add_criterion = {
        let max_score = long("max-score")
            .help("Maximum points for this criterion")
            .argument::<f64>("POINTS");
        let description = long("description")
            .help("What the criterion evaluates")
            .argument::<String>("TEXT")
            .optional();
        let name = positional::<String>("NAME").help("Criterion name");
        construct!(Cmd::AddCriterion {
            max_score,
            description,
            name
        })
        .to_options()
        .command("add-criterion")
        .help("Create a grading criterion")
    };

    let delete_criterion = {
        let id = positional::<i64>("ID").help("Criterion id");
        construct!(Cmd::DeleteCriterion { id })
            .to_options()
            .command("delete-criterion")
            .help("Delete a grading criterion; stored scores are kept")
    };

    construct!([
        grade,
        submit,
        regrade,
        finalize,
        review,
        add_user,
        add_criterion,
        delete_criterion
    ])
    .to_options()
    .descr("AI-assisted essay grading")
    .run()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn execute(ctx: StartupContext, cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::Grade {
            title,
            criteria,
            temperature,
            file,
        } => {
            let ids = (!criteria.is_empty()).then_some(criteria.as_slice());
            let result = ctx.grader.grade(&file, &title, ids, temperature).await;
            print_json(&result)
        }
        Cmd::Submit {
            student,
            teacher,
            title,
            file,
        } => {
            let response = ctx
                .essays
                .submit_essay(SubmitEssayRequest {
                    student_id: student,
                    teacher_id: teacher,
                    title,
                    file_path: file,
                })
                .await?;
            print_json(&response)
        }
        Cmd::Regrade { files } => print_json(&ctx.essays.regrade_files(&files).await),
        Cmd::Finalize {
            teacher,
            score,
            feedback,
            grading,
        } => {
            let grading = ctx
                .gradings
                .finalize_grading(
                    grading,
                    teacher,
                    FinalizeGradingRequest {
                        final_score: score,
                        feedback,
                    },
                )
                .await?;
            print_json(&grading)
        }
        Cmd::Review {
            teacher,
            status,
            essay,
        } => print_json(&ctx.gradings.review_essay(essay, teacher, status).await?),
        Cmd::AddUser { role, email, name } => {
            validate_email(&email).map_err(EssaySystemError::validation)?;
            let user = ctx
                .storage
                .create_user(CreateUserRequest { name, email, role })
                .await?;
            print_json(&user)
        }
        Cmd::AddCriterion {
            max_score,
            description,
            name,
        } => {
            let criterion = ctx
                .storage
                .create_criterion(CreateCriterionRequest {
                    name,
                    description,
                    max_score,
                })
                .await?;
            print_json(&criterion)
        }
        Cmd::DeleteCriterion { id } => {
            if !ctx.storage.delete_criterion(id).await? {
                return Err(EssaySystemError::not_found(format!("评分标准 {id} 不存在")));
            }
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn report(err: &EssaySystemError) {
    #[cfg(debug_assertions)]
    eprintln!("{}", err.format_colored());
    #[cfg(not(debug_assertions))]
    eprintln!("{}", err.format_simple());
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    setup_panic!();

    let cmd = options();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志，写到 stderr，stdout 只输出 JSON 结果
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    debug!(
        "Starting {} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.system_name
    );

    let ctx = match lifetime::startup::prepare_startup(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        res = execute(ctx, cmd) => match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report(&e);
                ExitCode::FAILURE
            }
        },
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Interrupted before the command finished");
            ExitCode::from(130)
        }
    }
}
