//! `patients` subcommands: list/search, add, edit, delete.

use std::sync::Arc;

use clap::{Args, Subcommand};

use clinic_app::{
    evaluate_session, AutoConfirm, ConfirmAction, PatientSubmitError, PatientsView, RouteDecision,
};
use clinic_client::PatientsGateway;
use clinic_core::{Patient, PatientForm, PatientId, UserId};

use crate::{AppHandles, PromptConfirm};

#[derive(Args, Debug)]
pub struct PatientsArgs {
    #[command(subcommand)]
    pub command: PatientsCommand,
}

#[derive(Subcommand, Debug)]
pub enum PatientsCommand {
    /// List patients, optionally filtered by a search term.
    List {
        /// Case-insensitive search across matricule, names, phone, and
        /// email.
        #[arg(long)]
        search: Option<String>,
    },

    /// Register a new patient.
    Add {
        #[arg(long)]
        matricule: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Attending physician account id.
        #[arg(long)]
        physician: Option<i64>,
    },

    /// Edit an existing patient; unspecified fields keep their value.
    Edit {
        id: i64,
        #[arg(long)]
        matricule: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Attending physician account id.
        #[arg(long)]
        physician: Option<i64>,
    },

    /// Delete a patient record.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run_patients(args: &PatientsArgs, handles: &AppHandles) -> anyhow::Result<u8> {
    handles.session.initialize().await;
    match evaluate_session(&handles.session, &[]) {
        RouteDecision::Allow => {}
        _ => {
            eprintln!("Not signed in. Run `clinic login <username>` first.");
            return Ok(1);
        }
    }

    let mut view = PatientsView::new(
        Arc::clone(&handles.client),
        Arc::clone(&handles.session),
    );

    match &args.command {
        PatientsCommand::List { search } => {
            view.load().await;
            if let Some(message) = view.error() {
                eprintln!("{message}");
                return Ok(1);
            }
            let rows = match search {
                Some(term) => view.search(term),
                None => view.patients().iter().collect(),
            };
            print_patients(&rows);
            Ok(0)
        }

        PatientsCommand::Add {
            matricule,
            last_name,
            first_name,
            phone,
            email,
            physician,
        } => {
            if !view.can_edit() {
                eprintln!("Insufficient permissions.");
                return Ok(1);
            }
            let form = PatientForm {
                matricule: matricule.clone(),
                last_name: last_name.clone(),
                first_name: first_name.clone(),
                phone: phone.clone().unwrap_or_default(),
                email: email.clone().unwrap_or_default(),
                attending_physician_id: physician.map(UserId::new),
            };
            let result = view.create(&form).await;
            submit(result, &mut view)
        }

        PatientsCommand::Edit {
            id,
            matricule,
            last_name,
            first_name,
            phone,
            email,
            physician,
        } => {
            if !view.can_edit() {
                eprintln!("Insufficient permissions.");
                return Ok(1);
            }
            let id = PatientId::new(*id);
            let existing = match PatientsGateway::new(Arc::clone(&handles.client))
                .get(id)
                .await
            {
                Ok(patient) => patient,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    return Ok(1);
                }
            };
            let mut form = PatientForm::from_patient(&existing);
            if let Some(value) = matricule {
                form.matricule = value.clone();
            }
            if let Some(value) = last_name {
                form.last_name = value.clone();
            }
            if let Some(value) = first_name {
                form.first_name = value.clone();
            }
            if let Some(value) = phone {
                form.phone = value.clone();
            }
            if let Some(value) = email {
                form.email = value.clone();
            }
            if let Some(value) = physician {
                form.attending_physician_id = Some(UserId::new(*value));
            }
            let result = view.update(id, &form).await;
            submit(result, &mut view)
        }

        PatientsCommand::Delete { id, yes } => {
            if !view.can_edit() {
                eprintln!("Insufficient permissions.");
                return Ok(1);
            }
            view.load().await;
            let confirm: &dyn ConfirmAction = if *yes { &AutoConfirm } else { &PromptConfirm };
            let outcome = view.delete(PatientId::new(*id), confirm).await;
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

fn submit(result: Result<(), PatientSubmitError>, view: &mut PatientsView) -> anyhow::Result<u8> {
    match result {
        Ok(()) => {
            if let Some(notice) = view.take_notice() {
                println!("{notice}");
            }
            Ok(0)
        }
        Err(PatientSubmitError::Validation(fields)) => {
            for (field, message) in fields.fields() {
                eprintln!("{field}: {message}");
            }
            Ok(1)
        }
        Err(PatientSubmitError::Rejected(message)) => {
            eprintln!("{message}");
            Ok(1)
        }
    }
}

fn print_patients(patients: &[&Patient]) {
    if patients.is_empty() {
        println!("No patients found.");
        return;
    }
    println!(
        "{:<6} {:<10} {:<24} {:<14} {:<28} {}",
        "ID", "MATRICULE", "NAME", "PHONE", "EMAIL", "PHYSICIAN"
    );
    for patient in patients {
        println!(
            "{:<6} {:<10} {:<24} {:<14} {:<28} {}",
            patient.id,
            patient.matricule,
            patient.full_name(),
            patient.phone.as_deref().unwrap_or("-"),
            patient.email.as_deref().unwrap_or("-"),
            patient
                .attending_physician_id
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!("{} patient(s)", patients.len());
}
