use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use url::Url;

/// Hands a URL to the platform (maps app, browser). Fire-and-forget.
#[derive(Clone)]
pub struct Linking<E> {
    context: CapabilityContext<LinkingOperation, E>,
}

impl<Ev> Capability<Ev> for Linking<Ev> {
    type Operation = LinkingOperation;
    type MappedSelf<MappedEv> = Linking<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Linking::new(self.context.map_event(f))
    }
}

impl<E> Linking<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<LinkingOperation, E>) -> Self {
        Self { context }
    }

    pub fn open_url(&self, url: &Url) {
        let context = self.context.clone();
        let operation = LinkingOperation::OpenUrl {
            url: url.to_string(),
        };
        self.context.spawn(async move {
            context.notify_shell(operation).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LinkingOperation {
    OpenUrl { url: String },
}

impl Operation for LinkingOperation {
    type Output = ();
}
