/*
[INPUT]:  Parsed subcommands and a GraphServiceClient
[OUTPUT]: JSON/CSV output on stdout (or a file), or the planned request in dry-run mode
[POS]:    Command layer - maps CLI verbs onto request builders
[UPDATE]: When adding subcommands or output formats
*/

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use msgraph_adapter::{
    CollectionQueryParameters, CountQueryParameters, DirectoryObject, GraphServiceClient,
    ItemQueryParameters, PageIterator, ReferenceCreate, RequestConfiguration, RequestInformation,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Users in the directory
    #[command(subcommand)]
    User(UserCommand),
    /// Groups and their membership
    #[command(subcommand)]
    Group(GroupCommand),
    /// Usage reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Show one user by id or user principal name
    Get {
        id: String,
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
    },
    /// List users
    List(ListArgs),
    /// Delete a user
    Delete { id: String },
    /// Groups and roles the user is a direct member of
    Groups {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Count users
    Count {
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum GroupCommand {
    /// Show one group
    Get {
        id: String,
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
    },
    /// List groups
    List(ListArgs),
    /// List direct members of a group
    Members {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add a directory object to a group
    AddMember { group_id: String, member_id: String },
    /// Remove a member from a group
    RemoveMember { group_id: String, member_id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReportCommand {
    /// Download a usage report as CSV
    Usage {
        /// Report function, e.g. getOffice365ActiveUserDetail
        #[arg(long)]
        function: String,
        /// D7, D30, D90 or D180
        #[arg(long, default_value = "D7")]
        period: String,
        /// Write the CSV here instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Shared collection options
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// OData $filter expression
    #[arg(long)]
    pub filter: Option<String>,
    /// Comma separated properties to return
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,
    /// Page size
    #[arg(long)]
    pub top: Option<i32>,
    /// Follow @odata.nextLink until the collection is exhausted
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    fn config(&self) -> RequestConfiguration<CollectionQueryParameters> {
        RequestConfiguration::with_query(CollectionQueryParameters {
            filter: self.filter.clone(),
            select: self.select.clone(),
            top: self.top,
            ..Default::default()
        })
    }
}

fn item_config(select: &[String]) -> RequestConfiguration<ItemQueryParameters> {
    RequestConfiguration::with_query(ItemQueryParameters {
        select: select.to_vec(),
        ..Default::default()
    })
}

/// `$count` only supports advanced queries with eventual consistency
fn count_config(filter: &Option<String>) -> RequestConfiguration<CountQueryParameters> {
    RequestConfiguration::with_query(CountQueryParameters {
        filter: filter.clone(),
        ..Default::default()
    })
    .header("ConsistencyLevel", "eventual")
}

/// Request a command would send
pub fn plan(client: &GraphServiceClient, command: &Command) -> Result<RequestInformation> {
    let info = match command {
        Command::User(user) => {
            let users = client.users();
            match user {
                UserCommand::Get { id, select } => users
                    .by_user_id(id)
                    .to_get_request_information(Some(&item_config(select))),
                UserCommand::List(list) => users.to_get_request_information(Some(&list.config())),
                UserCommand::Delete { id } => {
                    users.by_user_id(id).to_delete_request_information(None)
                }
                UserCommand::Groups { id, list } => users
                    .by_user_id(id)
                    .member_of()
                    .to_get_request_information(Some(&list.config())),
                UserCommand::Count { filter } => users
                    .count()
                    .to_get_request_information(Some(&count_config(filter))),
            }
        }
        Command::Group(group) => {
            let groups = client.groups();
            match group {
                GroupCommand::Get { id, select } => groups
                    .by_group_id(id)
                    .to_get_request_information(Some(&item_config(select))),
                GroupCommand::List(list) => {
                    groups.to_get_request_information(Some(&list.config()))
                }
                GroupCommand::Members { id, list } => groups
                    .by_group_id(id)
                    .members()
                    .to_get_request_information(Some(&list.config())),
                GroupCommand::AddMember {
                    group_id,
                    member_id,
                } => {
                    let body = ReferenceCreate::directory_object(client.base_url(), member_id);
                    groups
                        .by_group_id(group_id)
                        .members()
                        .reference()
                        .to_post_request_information(&body, None)?
                }
                GroupCommand::RemoveMember {
                    group_id,
                    member_id,
                } => groups
                    .by_group_id(group_id)
                    .members()
                    .by_directory_object_id(member_id)
                    .reference()
                    .to_delete_request_information(None),
            }
        }
        Command::Report(ReportCommand::Usage {
            function, period, ..
        }) => client
            .reports()
            .usage_report(function, period.clone())?
            .to_get_request_information(None),
    };
    Ok(info)
}

/// Print `METHOD URL` (and the body, if any) without sending anything
pub fn print_plan<W: Write>(info: &RequestInformation, out: &mut W) -> Result<()> {
    let url = info.url().context("resolve request url")?;
    writeln!(out, "{} {}", info.method, url)?;
    if let Some(content) = &info.content {
        writeln!(out, "{}", String::from_utf8_lossy(content))?;
    }
    Ok(())
}

/// Run a command against Graph and write its result to `out`
pub async fn execute<W: Write>(
    client: &GraphServiceClient,
    command: &Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::User(user) => execute_user(client, command, user, out).await,
        Command::Group(group) => execute_group(client, command, group, out).await,
        Command::Report(ReportCommand::Usage {
            function,
            period,
            output,
        }) => {
            let csv = client
                .reports()
                .usage_report(function, period.clone())?
                .get(None)
                .await
                .with_context(|| format!("download report {function}"))?;
            match output {
                Some(path) => {
                    std::fs::write(path, &csv)
                        .with_context(|| format!("write report to {}", path.display()))?;
                    info!(path = %path.display(), bytes = csv.len(), "report saved");
                }
                None => out.write_all(&csv)?,
            }
            Ok(())
        }
    }
}

async fn execute_user<W: Write>(
    client: &GraphServiceClient,
    command: &Command,
    user: &UserCommand,
    out: &mut W,
) -> Result<()> {
    let users = client.users();
    match user {
        UserCommand::Get { id, select } => {
            let user = users
                .by_user_id(id)
                .get(Some(&item_config(select)))
                .await
                .with_context(|| format!("get user {id}"))?;
            print_json(out, &user)
        }
        UserCommand::List(list) if list.all => {
            let all = collect_pages::<msgraph_adapter::User>(client, command).await?;
            print_json(out, &all)
        }
        UserCommand::List(list) => {
            let page = users
                .get(Some(&list.config()))
                .await
                .context("list users")?;
            print_json(out, &page)
        }
        UserCommand::Delete { id } => {
            users
                .by_user_id(id)
                .delete(None)
                .await
                .with_context(|| format!("delete user {id}"))?;
            info!(user_id = %id, "user deleted");
            Ok(())
        }
        UserCommand::Groups { list, .. } if list.all => {
            let all = collect_pages::<DirectoryObject>(client, command).await?;
            print_json(out, &all)
        }
        UserCommand::Groups { id, list } => {
            let page = users
                .by_user_id(id)
                .member_of()
                .get(Some(&list.config()))
                .await
                .with_context(|| format!("list memberships of {id}"))?;
            print_json(out, &page)
        }
        UserCommand::Count { filter } => {
            let count = users
                .count()
                .get(Some(&count_config(filter)))
                .await
                .context("count users")?;
            writeln!(out, "{count}")?;
            Ok(())
        }
    }
}

async fn execute_group<W: Write>(
    client: &GraphServiceClient,
    command: &Command,
    group: &GroupCommand,
    out: &mut W,
) -> Result<()> {
    let groups = client.groups();
    match group {
        GroupCommand::Get { id, select } => {
            let group = groups
                .by_group_id(id)
                .get(Some(&item_config(select)))
                .await
                .with_context(|| format!("get group {id}"))?;
            print_json(out, &group)
        }
        GroupCommand::List(list) if list.all => {
            let all = collect_pages::<msgraph_adapter::Group>(client, command).await?;
            print_json(out, &all)
        }
        GroupCommand::List(list) => {
            let page = groups
                .get(Some(&list.config()))
                .await
                .context("list groups")?;
            print_json(out, &page)
        }
        GroupCommand::Members { list, .. } if list.all => {
            let all = collect_pages::<DirectoryObject>(client, command).await?;
            print_json(out, &all)
        }
        GroupCommand::Members { id, list } => {
            let page = groups
                .by_group_id(id)
                .members()
                .get(Some(&list.config()))
                .await
                .with_context(|| format!("list members of {id}"))?;
            print_json(out, &page)
        }
        GroupCommand::AddMember {
            group_id,
            member_id,
        } => {
            let body = ReferenceCreate::directory_object(client.base_url(), member_id);
            groups
                .by_group_id(group_id)
                .members()
                .reference()
                .post(&body, None)
                .await
                .with_context(|| format!("add {member_id} to group {group_id}"))?;
            info!(group_id = %group_id, member_id = %member_id, "member added");
            Ok(())
        }
        GroupCommand::RemoveMember {
            group_id,
            member_id,
        } => {
            groups
                .by_group_id(group_id)
                .members()
                .by_directory_object_id(member_id)
                .reference()
                .delete(None)
                .await
                .with_context(|| format!("remove {member_id} from group {group_id}"))?;
            info!(group_id = %group_id, member_id = %member_id, "member removed");
            Ok(())
        }
    }
}

/// Every item of the collection `command` lists
async fn collect_pages<T>(client: &GraphServiceClient, command: &Command) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send,
{
    let request = plan(client, command)?;
    let mut pages = PageIterator::<T>::from_request(Arc::clone(client.adapter()), request)
        .await
        .context("fetch first page")?;
    let items = pages.collect_all().await.context("fetch remaining pages")?;
    info!(pages = pages.pages(), items = items.len(), "collection fetched");
    Ok(items)
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
