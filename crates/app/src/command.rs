use std::io::Write;

use tracing::debug;
use whereis_client::{
    DateResolver, Error, Filters, NoTrace, Query, Request, Result, TraceSink, WhereisApi, WriterTrace,
};
use whereis_config::{Config, expand_env};

use crate::cli::Cli;
use crate::present::Presenter;

/// A validated invocation, ready to hit the API.
#[derive(Debug)]
pub struct Invocation {
    pub token: String,
    pub query: Query,
    pub verbose: bool,
    presenter: Presenter,
}

impl Invocation {
    /// Checks everything that can fail before any network activity, in
    /// order: offline mode, token, positional arguments, dates, pattern.
    pub fn prepare(cli: &Cli, config: &Config, dates: &DateResolver) -> Result<Self> {
        if cli.offline || config.offline {
            return Err(Error::Configuration("can not run the command in offline mode".to_string()));
        }

        let token = match &cli.token {
            Some(raw) => expand_env(raw),
            None => config.token.clone(),
        };
        if token.trim().is_empty() {
            return Err(Error::Configuration(
                "require an access token to run the command, pass --token or set $SL_TOKEN".to_string(),
            ));
        }

        if cli.names.len() > 1 {
            return Err(Error::Usage("this command does not accept more than 1 arguments".to_string()));
        }

        let filters = Filters {
            name: cli.names.first().cloned().unwrap_or_default(),
            place: cli.place.clone(),
            size: cli.size.clone(),
            page: cli.page.clone(),
            from: cli.from.clone(),
            to: cli.to.clone(),
        };
        let query = Query::build(&filters, dates)?;
        let presenter = Presenter::new(cli.grep.as_deref())?;

        Ok(Self {
            token: token.trim().to_string(),
            query,
            verbose: cli.verbose || config.verbose,
            presenter,
        })
    }

    pub async fn run<A: WhereisApi>(
        &self,
        api: &A,
        trace: &mut dyn TraceSink,
        out: &mut impl Write,
    ) -> Result<()> {
        let request = Request { token: &self.token, query: &self.query };
        let page = api.fetch(&request, trace).await?;
        debug!(records = page.content.len(), "rendering page");
        self.presenter.render(&page, out)?;
        Ok(())
    }
}

/// Validate, fetch and render. Nothing reaches `api` unless validation
/// passes. In verbose mode the HTTP trace goes to `trace_out`.
pub async fn execute<A: WhereisApi>(
    cli: &Cli,
    config: &Config,
    dates: &DateResolver,
    api: &A,
    trace_out: impl Write,
    out: &mut impl Write,
) -> Result<()> {
    let invocation = Invocation::prepare(cli, config, dates)?;
    let mut writer = WriterTrace(trace_out);
    let mut quiet = NoTrace;
    let trace: &mut dyn TraceSink = if invocation.verbose { &mut writer } else { &mut quiet };
    invocation.run(api, trace, out).await
}
