use anyhow::{Context, Result};
use tracing::{debug, info_span};

use cog_cli::output::{
    CommuneOutput, communes_table, doctor_table, entries_table, filters_table, to_json,
};
use cog_codes::{
    CogContext, CommuneMatch, DoctorReport, FilterError, SearchFilters, resolve_filters,
    section_filter_code,
};

use crate::cli::{
    CodeArgs, CommuneArgs, FiltersArgs, KindArg, ListArgs, NameArgs, OutputArgs, SearchArgs,
    TableArg,
};

/// How a command ended, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    /// The input did not resolve to exactly one code.
    Unresolved,
    /// `doctor` found a broken reference file.
    Unhealthy,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Resolved => 0,
            Self::Unhealthy => 1,
            Self::Unresolved => 2,
        }
    }
}

pub fn run_region(cog: &CogContext, args: &NameArgs) -> Result<Outcome> {
    let _guard = info_span!("region", name = %args.name).entered();
    let code = cog.region_code(&args.name).context("resolve region")?;
    Ok(report_code("region", &args.name, code))
}

pub fn run_departement(cog: &CogContext, args: &NameArgs) -> Result<Outcome> {
    let _guard = info_span!("departement", name = %args.name).entered();
    let code = cog
        .departement_code(&args.name)
        .context("resolve departement")?;
    Ok(report_code("departement", &args.name, code))
}

pub fn run_section(cog: &CogContext, args: &NameArgs) -> Result<Outcome> {
    let _guard = info_span!("section", label = %args.name).entered();
    let code = section_filter_code(cog, &args.name).context("resolve section")?;
    Ok(report_code("section", &args.name, code.as_deref()))
}

pub fn run_commune(cog: &CogContext, args: &CommuneArgs) -> Result<Outcome> {
    let _guard = info_span!("commune", name = %args.name).entered();
    let resolved = cog
        .commune_code(&args.name, args.departement.as_deref())
        .context("resolve commune")?;

    if args.output.json {
        let output = match &resolved {
            CommuneMatch::Found(commune) => CommuneOutput::Found { commune: *commune },
            CommuneMatch::NotFound => CommuneOutput::NotFound { name: &args.name },
            CommuneMatch::Ambiguous(candidates) => CommuneOutput::Ambiguous {
                name: &args.name,
                candidates: candidates.clone(),
            },
        };
        println!("{}", to_json(&output)?);
        return Ok(if resolved.found().is_some() {
            Outcome::Resolved
        } else {
            Outcome::Unresolved
        });
    }

    match resolved {
        CommuneMatch::Found(commune) => {
            println!("{}", commune.code);
            Ok(Outcome::Resolved)
        }
        CommuneMatch::NotFound => {
            eprintln!("commune '{}' not found", args.name);
            Ok(Outcome::Unresolved)
        }
        CommuneMatch::Ambiguous(candidates) => {
            eprintln!(
                "commune '{}' is ambiguous ({} matches); pass --departement to narrow it down",
                args.name,
                candidates.len()
            );
            println!("{}", communes_table(&candidates));
            Ok(Outcome::Unresolved)
        }
    }
}

pub fn run_name(cog: &CogContext, args: &CodeArgs) -> Result<Outcome> {
    let _guard = info_span!("name", code = %args.code).entered();
    let (kind, name) = match args.kind {
        KindArg::Region => ("region", cog.region_name(&args.code)),
        KindArg::Departement => ("departement", cog.departement_name(&args.code)),
        KindArg::Commune => ("commune", cog.commune_name(&args.code)),
        KindArg::Section => ("section", cog.section_label(&args.code)),
    };
    let name = name.with_context(|| format!("look up {kind} code"))?;
    match name {
        Some(name) => {
            println!("{name}");
            Ok(Outcome::Resolved)
        }
        None => {
            eprintln!("no {kind} with code '{}'", args.code.trim());
            Ok(Outcome::Unresolved)
        }
    }
}

pub fn run_list(cog: &CogContext, args: &ListArgs) -> Result<Outcome> {
    let entries = match args.table {
        TableArg::Regions => cog.list_regions(),
        TableArg::Departements => cog.list_departements(),
        TableArg::Sections => cog.list_sections(),
    }
    .context("list reference table")?;
    debug!(entries = entries.len(), "listing");
    if args.output.json {
        println!("{}", to_json(entries)?);
    } else {
        println!("{}", entries_table(entries));
    }
    Ok(Outcome::Resolved)
}

pub fn run_search(cog: &CogContext, args: &SearchArgs) -> Result<Outcome> {
    let _guard = info_span!("search", pattern = %args.pattern).entered();
    let found = cog
        .search_communes(&args.pattern, args.departement.as_deref())
        .context("search communes")?;
    debug!(matches = found.len(), "search complete");
    if args.output.json {
        println!("{}", to_json(&found)?);
    } else if found.is_empty() {
        eprintln!("no commune name contains '{}'", args.pattern.trim());
    } else {
        println!("{}", communes_table(&found));
    }
    Ok(Outcome::Resolved)
}

pub fn run_filters(cog: &CogContext, args: &FiltersArgs) -> Result<Outcome> {
    let _guard = info_span!("filters").entered();
    let filters = SearchFilters {
        region: args.region.clone(),
        departement: args.departement.clone(),
        commune: args.commune.clone(),
        section: args.section.clone(),
    };
    match resolve_filters(cog, &filters) {
        Ok(resolved) => {
            if args.output.json {
                println!("{}", to_json(&resolved)?);
            } else {
                println!("{}", filters_table(&resolved));
            }
            Ok(Outcome::Resolved)
        }
        Err(FilterError::Unresolved(unresolved)) => {
            if args.output.json {
                println!("{}", to_json(&unresolved)?);
            } else {
                eprintln!("{unresolved}");
            }
            Ok(Outcome::Unresolved)
        }
        Err(FilterError::Dataset(error)) => Err(error).context("translate filters"),
    }
}

pub fn run_doctor(cog: &CogContext, args: &OutputArgs) -> Result<Outcome> {
    let report = DoctorReport::collect(cog.config());
    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        println!("Data directory: {}", report.data_dir.display());
        println!("{}", doctor_table(&report));
    }
    Ok(if report.is_healthy() {
        Outcome::Resolved
    } else {
        Outcome::Unhealthy
    })
}

fn report_code(kind: &str, input: &str, code: Option<&str>) -> Outcome {
    match code {
        Some(code) => {
            println!("{code}");
            Outcome::Resolved
        }
        None => {
            eprintln!("{kind} '{}' not found", input.trim());
            Outcome::Unresolved
        }
    }
}
