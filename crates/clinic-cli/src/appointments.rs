//! `appointments` subcommands: list (grouped by day), add, status
//! transitions, delete.

use std::sync::Arc;

use clap::{Args, Subcommand, ValueEnum};

use clinic_app::{
    evaluate_session, AppointmentSubmitError, AppointmentsView, AutoConfirm, ConfirmAction,
    RouteDecision, StatusFilter,
};
use clinic_core::{AppointmentForm, AppointmentId, AppointmentStatus, PatientId, UserId};

use crate::{AppHandles, PromptConfirm};

#[derive(Args, Debug)]
pub struct AppointmentsArgs {
    #[command(subcommand)]
    pub command: AppointmentsCommand,
}

/// Status filter values accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusArg {
    All,
    Scheduled,
    Completed,
    Cancelled,
}

impl StatusArg {
    fn to_filter(self) -> StatusFilter {
        match self {
            Self::All => StatusFilter::All,
            Self::Scheduled => StatusFilter::Only(AppointmentStatus::Scheduled),
            Self::Completed => StatusFilter::Only(AppointmentStatus::Completed),
            Self::Cancelled => StatusFilter::Only(AppointmentStatus::Cancelled),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AppointmentsCommand {
    /// List appointments grouped by day, most recent first.
    List {
        /// Show only appointments in this state.
        #[arg(long, value_enum, default_value = "all")]
        status: StatusArg,
    },

    /// Book a new appointment (status starts as scheduled).
    Add {
        /// Patient record id.
        #[arg(long)]
        patient: i64,
        /// Physician account id.
        #[arg(long)]
        physician: i64,
        /// Visit date, YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// Visit time, HH:MM.
        #[arg(long)]
        time: String,
    },

    /// Mark a scheduled appointment as completed.
    Done { id: i64 },

    /// Cancel a scheduled appointment.
    Cancel { id: i64 },

    /// Delete an appointment record.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run_appointments(
    args: &AppointmentsArgs,
    handles: &AppHandles,
) -> anyhow::Result<u8> {
    handles.session.initialize().await;
    match evaluate_session(&handles.session, &[]) {
        RouteDecision::Allow => {}
        _ => {
            eprintln!("Not signed in. Run `clinic login <username>` first.");
            return Ok(1);
        }
    }

    let mut view = AppointmentsView::new(
        Arc::clone(&handles.client),
        Arc::clone(&handles.session),
    );

    match &args.command {
        AppointmentsCommand::List { status } => {
            view.set_filter(status.to_filter());
            view.load().await;
            if let Some(message) = view.error() {
                eprintln!("{message}");
                return Ok(1);
            }
            print_grouped(&view);
            Ok(0)
        }

        AppointmentsCommand::Add {
            patient,
            physician,
            date,
            time,
        } => {
            if !view.can_edit() {
                eprintln!("Insufficient permissions.");
                return Ok(1);
            }
            let form = AppointmentForm {
                patient_id: Some(PatientId::new(*patient)),
                physician_id: Some(UserId::new(*physician)),
                date: date.clone(),
                time: time.clone(),
                status: None,
            };
            let result = view.create(&form).await;
            match result {
                Ok(()) => {
                    if let Some(notice) = view.take_notice() {
                        println!("{notice}");
                    }
                    Ok(0)
                }
                Err(AppointmentSubmitError::Validation(fields)) => {
                    for (field, message) in fields.fields() {
                        eprintln!("{field}: {message}");
                    }
                    Ok(1)
                }
                Err(AppointmentSubmitError::Rejected(message)) => {
                    eprintln!("{message}");
                    Ok(1)
                }
            }
        }

        AppointmentsCommand::Done { id } => {
            transition(&mut view, *id, AppointmentStatus::Completed).await
        }

        AppointmentsCommand::Cancel { id } => {
            transition(&mut view, *id, AppointmentStatus::Cancelled).await
        }

        AppointmentsCommand::Delete { id, yes } => {
            if !view.can_edit() {
                eprintln!("Insufficient permissions.");
                return Ok(1);
            }
            let confirm: &dyn ConfirmAction = if *yes { &AutoConfirm } else { &PromptConfirm };
            let outcome = view.delete(AppointmentId::new(*id), confirm).await;
            match outcome {
                Ok(true) => {
                    if let Some(notice) = view.take_notice() {
                        println!("{notice}");
                    }
                    Ok(0)
                }
                Ok(false) => {
                    println!("Aborted.");
                    Ok(0)
                }
                Err(message) => {
                    eprintln!("{message}");
                    Ok(1)
                }
            }
        }
    }
}

async fn transition(
    view: &mut AppointmentsView,
    id: i64,
    status: AppointmentStatus,
) -> anyhow::Result<u8> {
    if !view.can_edit() {
        eprintln!("Insufficient permissions.");
        return Ok(1);
    }
    // The transition gate needs the current status, so load first.
    view.load().await;
    if let Some(message) = view.error() {
        eprintln!("{message}");
        return Ok(1);
    }
    let result = view.update_status(AppointmentId::new(id), status).await;
    match result {
        Ok(()) => {
            if let Some(notice) = view.take_notice() {
                println!("{notice}");
            }
            Ok(0)
        }
        Err(message) => {
            eprintln!("{message}");
            Ok(1)
        }
    }
}

fn print_grouped(view: &AppointmentsView) {
    let grouped = view.grouped();
    if grouped.is_empty() {
        println!("No appointments found.");
        return;
    }
    for (date, appointments) in &grouped {
        println!("{date} — {} appointment(s)", appointments.len());
        for appointment in appointments {
            println!(
                "  {:<6} {}  {:<34} physician #{:<4} {}",
                appointment.id,
                appointment.time.format("%H:%M"),
                view.patient_label(appointment.patient_id),
                appointment.physician_id,
                appointment.status,
            );
        }
    }
    println!(
        "{} of {} appointment(s) shown",
        view.filtered().len(),
        view.count(StatusFilter::All)
    );
}
