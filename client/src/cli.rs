//! Command-line surface.
//!
//! Deliberately thin: parse arguments, run the matching flow, print a
//! plain-text view of the result. Every
//! protected command's first action is the session check; institution-only
//! commands are additionally role-gated inside the review flows.

use clap::{Parser, Subcommand, ValueEnum};

use campaign_lifecycle::{Campaign, ReviewSummary, ReviewTab, TabbedCampaigns};

use crate::api::Backend;
use crate::donate::{self, DonationRequest};
use crate::errors::Result;
use crate::register::{self, InstitutionProfile, UserProfile};
use crate::review;
use crate::session::{self, require_session, Role, SessionStore};

#[derive(Parser)]
#[command(
    name = "donations",
    about = "Client for the P2P donations platform",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and persist the identity triple
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, value_enum)]
        role: Role,
    },
    /// Clear the stored identity
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Create a donor/beneficiary account
    RegisterUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        pan: String,
        #[arg(long)]
        aadhar: Option<String>,
        #[arg(long)]
        beneficiary: bool,
    },
    /// Create an institution record
    RegisterInstitution {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        gst: String,
        #[arg(long)]
        pan: String,
        #[arg(long = "type")]
        institution_type: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        pincode: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        registration_number: Option<String>,
        #[arg(long)]
        bank_account: Option<String>,
        #[arg(long)]
        bank_name: Option<String>,
        #[arg(long)]
        ifsc: Option<String>,
        #[arg(long)]
        account_holder: Option<String>,
    },
    /// Browse campaigns (live by default)
    Campaigns {
        /// The complete set, as the review surface sees it
        #[arg(long, conflicts_with_all = ["approved", "institution"])]
        all: bool,
        /// Approved campaigns only
        #[arg(long, conflicts_with = "institution")]
        approved: bool,
        /// Campaigns belonging to one institution
        #[arg(long)]
        institution: Option<i64>,
    },
    /// Show one campaign in detail
    Show { id: i64 },
    /// Submit a new campaign
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        beneficiary: i64,
        #[arg(long)]
        institution: i64,
        /// Supporting-document reference
        #[arg(long)]
        report: Option<String>,
    },
    /// Donate to a campaign
    Donate {
        campaign_id: i64,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        upi: String,
        #[arg(long)]
        anonymous: bool,
        #[arg(long)]
        message: Option<String>,
    },
    /// Institution review: campaigns grouped by tab
    Review {
        #[arg(long, value_enum)]
        tab: Option<TabArg>,
    },
    /// Approve a pending campaign
    Approve { id: i64 },
    /// Reject a pending campaign
    Reject { id: i64 },
    /// Close an approved campaign
    Close { id: i64 },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TabArg {
    Pending,
    Approved,
    Closed,
}

impl From<TabArg> for ReviewTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Pending => ReviewTab::Pending,
            TabArg::Approved => ReviewTab::Approved,
            TabArg::Closed => ReviewTab::Closed,
        }
    }
}

pub async fn run(command: Command, backend: &Backend, store: &SessionStore) -> Result<()> {
    match command {
        Command::Login { email, role } => {
            let session = session::login(backend, store, &email, role).await?;
            println!(
                "Signed in as {} ({}, id {})",
                session.email,
                session.role.as_str(),
                session.id
            );
        }

        Command::Logout => {
            session::logout(store)?;
            println!("Signed out");
        }

        Command::Whoami => {
            let session = require_session(store)?;
            println!(
                "{} ({}, id {})",
                session.email,
                session.role.as_str(),
                session.id
            );
        }

        Command::RegisterUser {
            name,
            email,
            phone,
            pan,
            aadhar,
            beneficiary,
        } => {
            let profile = UserProfile {
                name,
                email,
                phone,
                pan,
                aadhar_card: aadhar,
                is_beneficiary: beneficiary,
            };
            register::register_user(backend, &profile).await?;
            println!("Registered {}. You can now sign in.", profile.email);
        }

        Command::RegisterInstitution {
            name,
            email,
            phone,
            gst,
            pan,
            institution_type,
            address,
            city,
            state,
            pincode,
            country,
            registration_number,
            bank_account,
            bank_name,
            ifsc,
            account_holder,
        } => {
            let mut profile =
                InstitutionProfile::new(name, email, phone, gst, pan, institution_type);
            profile.address = address;
            profile.city = city;
            profile.state = state;
            profile.pincode = pincode;
            profile.country = country;
            profile.registration_number = registration_number;
            profile.bank_account_number = bank_account;
            profile.bank_name = bank_name;
            profile.ifsc_code = ifsc;
            profile.account_holder_name = account_holder;
            register::register_institution(backend, &profile).await?;
            println!("Registered {}. You can now sign in.", profile.email);
        }

        Command::Campaigns {
            all,
            approved,
            institution,
        } => {
            require_session(store)?;
            let campaigns = if all {
                backend.all_campaigns().await?
            } else if approved {
                backend.approved_campaigns().await?
            } else if let Some(id) = institution {
                backend.campaigns_by_institution(id).await?
            } else {
                backend.live_campaigns().await?
            };
            print_campaign_list(&campaigns);
        }

        Command::Show { id } => {
            require_session(store)?;
            let campaign = backend.campaign_by_id(id).await?;
            print_campaign_detail(&campaign);
        }

        Command::Create {
            title,
            description,
            beneficiary,
            institution,
            report,
        } => {
            require_session(store)?;
            let campaign =
                Campaign::new_submission(beneficiary, institution, title, description, report);
            backend.create_campaign(&campaign).await?;
            println!("Campaign created. It is live and awaiting review.");
        }

        Command::Donate {
            campaign_id,
            amount,
            upi,
            anonymous,
            message,
        } => {
            let session = require_session(store)?;
            let request = DonationRequest {
                amount,
                upi_id: upi,
                anonymous,
                message,
            };
            let campaign = donate::donate(backend, &session, campaign_id, &request).await?;
            println!("Thank you! Your donation is being processed.");
            print_campaign_detail(&campaign);
        }

        Command::Review { tab } => {
            let session = require_session(store)?;
            session.require_institution()?;
            let (tabs, summary) = review::review_tabs(backend).await?;
            print_review(&tabs, &summary, tab.map(ReviewTab::from));
        }

        Command::Approve { id } => {
            let session = require_session(store)?;
            let tabs = review::approve(backend, &session, id).await?;
            println!("Campaign {id} approved.");
            print_tab_counts(&tabs);
        }

        Command::Reject { id } => {
            let session = require_session(store)?;
            let tabs = review::reject(backend, &session, id).await?;
            println!("Campaign {id} rejected.");
            print_tab_counts(&tabs);
        }

        Command::Close { id } => {
            let session = require_session(store)?;
            let tabs = review::close(backend, &session, id).await?;
            println!("Campaign {id} closed.");
            print_tab_counts(&tabs);
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────

fn badges(campaign: &Campaign) -> String {
    let flags = &campaign.flags;
    let mut parts = Vec::new();
    if flags.is_live {
        parts.push("LIVE");
    }
    if flags.is_approved {
        parts.push("APPROVED");
    }
    if flags.is_fulfilled {
        parts.push("CLOSED");
    }
    if !flags.is_approved && !flags.is_fulfilled {
        parts.push("PENDING");
    }
    parts.join(" ")
}

fn print_campaign_list(campaigns: &[Campaign]) {
    if campaigns.is_empty() {
        println!("No campaigns found.");
        return;
    }
    for campaign in campaigns {
        println!(
            "#{:<5} [{}] {} — ₹{:.0} from {} donors",
            campaign.id.unwrap_or_default(),
            badges(campaign),
            campaign.title,
            campaign.fund_raised,
            campaign.donor_count
        );
    }
}

fn print_campaign_detail(campaign: &Campaign) {
    println!("#{} {}", campaign.id.unwrap_or_default(), campaign.title);
    println!("  [{}]", badges(campaign));
    println!(
        "  Raised ₹{:.2} from {} donors",
        campaign.fund_raised, campaign.donor_count
    );
    println!("  Beneficiary {}, institution {}", campaign.beneficiary_id, campaign.institution_id);
    if let Some(report) = &campaign.report_file_id {
        println!("  Supporting document: {report}");
    }
    println!("  {}", campaign.description);
}

fn print_review(tabs: &TabbedCampaigns, summary: &ReviewSummary, only: Option<ReviewTab>) {
    println!(
        "{} campaigns, {} pending — ₹{:.0} raised from {} donors",
        summary.total_campaigns, summary.pending, summary.funds_raised, summary.donors
    );
    let shown = match only {
        Some(tab) => vec![tab],
        None => vec![ReviewTab::Pending, ReviewTab::Approved, ReviewTab::Closed],
    };
    for tab in shown {
        let campaigns = tabs.tab(tab);
        println!("\n{} ({})", tab.as_str(), campaigns.len());
        print_campaign_list(campaigns);
    }
}

fn print_tab_counts(tabs: &TabbedCampaigns) {
    println!(
        "Pending: {}, approved: {}, closed: {}",
        tabs.pending.len(),
        tabs.approved.len(),
        tabs.closed.len()
    );
}
