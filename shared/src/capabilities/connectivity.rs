use crux_core::capability::{Capability, CapabilityContext, Operation};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

/// Network-status subscription.
///
/// `Subscribe` is a streaming request: the shell resolves it once per
/// change for as long as the subscription lives. `Unsubscribe` tells the
/// shell to stop.
#[derive(Clone)]
pub struct Connectivity<E> {
    context: CapabilityContext<ConnectivityOperation, E>,
}

impl<Ev> Capability<Ev> for Connectivity<Ev> {
    type Operation = ConnectivityOperation;
    type MappedSelf<MappedEv> = Connectivity<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Connectivity::new(self.context.map_event(f))
    }
}

impl<E> Connectivity<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<ConnectivityOperation, E>) -> Self {
        Self { context }
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(ConnectivityOutput) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let mut updates =
                std::pin::pin!(context.stream_from_shell(ConnectivityOperation::Subscribe));
            while let Some(output) = updates.next().await {
                context.update_app(callback(output));
            }
        });
    }

    pub fn unsubscribe(&self) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context
                .notify_shell(ConnectivityOperation::Unsubscribe)
                .await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConnectivityOperation {
    Subscribe,
    Unsubscribe,
}

impl Operation for ConnectivityOperation {
    type Output = ConnectivityOutput;
}

/// Platform network snapshot. `is_internet_reachable` is `None` while the
/// platform has not finished probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkState {
    pub is_connected: bool,
    pub is_internet_reachable: Option<bool>,
}

impl NetworkState {
    pub fn new(is_connected: bool, is_internet_reachable: Option<bool>) -> Self {
        Self {
            is_connected,
            is_internet_reachable,
        }
    }

    /// Link present and internet reachable. Unknown reachability counts
    /// as unreachable.
    pub fn is_online(&self) -> bool {
        self.is_connected && self.is_internet_reachable.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityOutput {
    State(NetworkState),
    Unavailable { reason: String },
}
