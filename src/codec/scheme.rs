//! Registry of decodable object kinds
//!
//! A `Scheme` is built once at startup and handed to the decoder; nothing
//! registers kinds behind its back.

use std::collections::HashSet;
use std::fmt;

use super::errors::{CodecError, CodecResult};

/// Type tag identifying an object's schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersionKind {
    /// API group; empty for the core group.
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Split an `apiVersion` value (`group/version` or `version`) and attach `kind`.
    pub fn from_api_version(api_version: &str, kind: &str) -> CodecResult<Self> {
        let (group, version) = match api_version.rsplit_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        };

        if version.is_empty() || (api_version.contains('/') && group.is_empty()) {
            return Err(CodecError::MalformedApiVersion(api_version.to_string()));
        }

        Ok(Self::new(group, version, kind))
    }

    /// Parse `group/version/Kind` or `version/Kind`.
    pub fn parse(spec: &str) -> CodecResult<Self> {
        let invalid = || CodecError::InvalidKindSpec(spec.to_string());

        let (api_version, kind) = spec.rsplit_once('/').ok_or_else(invalid)?;
        if kind.is_empty() || api_version.matches('/').count() > 1 {
            return Err(invalid());
        }

        Self::from_api_version(api_version, kind).map_err(|_| invalid())
    }

    /// The `apiVersion` spelling: `group/version`, or bare `version` for the core group.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// Core, workload and platform kinds known out of the box.
const BUILTIN_KINDS: &[(&str, &str, &[&str])] = &[
    (
        "",
        "v1",
        &[
            "Binding",
            "ConfigMap",
            "Endpoints",
            "Event",
            "LimitRange",
            "Namespace",
            "Node",
            "PersistentVolume",
            "PersistentVolumeClaim",
            "Pod",
            "PodTemplate",
            "ReplicationController",
            "ResourceQuota",
            "Secret",
            "Service",
            "ServiceAccount",
            // Legacy platform kinds served from the core group
            "Build",
            "BuildConfig",
            "DeploymentConfig",
            "Group",
            "Identity",
            "Image",
            "ImageStream",
            "Project",
            "Route",
            "Template",
            "User",
        ],
    ),
    (
        "apps",
        "v1",
        &["ControllerRevision", "DaemonSet", "Deployment", "ReplicaSet", "StatefulSet"],
    ),
    ("batch", "v1", &["CronJob", "Job"]),
    ("autoscaling", "v2", &["HorizontalPodAutoscaler"]),
    ("policy", "v1", &["PodDisruptionBudget"]),
    (
        "rbac.authorization.k8s.io",
        "v1",
        &["ClusterRole", "ClusterRoleBinding", "Role", "RoleBinding"],
    ),
    (
        "networking.k8s.io",
        "v1",
        &["Ingress", "IngressClass", "NetworkPolicy"],
    ),
    (
        "storage.k8s.io",
        "v1",
        &["CSIDriver", "CSINode", "StorageClass", "VolumeAttachment"],
    ),
    ("coordination.k8s.io", "v1", &["Lease"]),
    ("discovery.k8s.io", "v1", &["EndpointSlice"]),
    ("scheduling.k8s.io", "v1", &["PriorityClass"]),
    (
        "apiextensions.k8s.io",
        "v1",
        &["CustomResourceDefinition"],
    ),
    (
        "admissionregistration.k8s.io",
        "v1",
        &["MutatingWebhookConfiguration", "ValidatingWebhookConfiguration"],
    ),
    ("apps.openshift.io", "v1", &["DeploymentConfig"]),
    ("build.openshift.io", "v1", &["Build", "BuildConfig"]),
    ("image.openshift.io", "v1", &["Image", "ImageStream"]),
    ("project.openshift.io", "v1", &["Project"]),
    ("route.openshift.io", "v1", &["Route"]),
    ("template.openshift.io", "v1", &["Template"]),
    ("user.openshift.io", "v1", &["Group", "Identity", "User"]),
    (
        "oauth.openshift.io",
        "v1",
        &["OAuthAccessToken", "OAuthAuthorizeToken", "OAuthClient"],
    ),
    (
        "security.openshift.io",
        "v1",
        &["SecurityContextConstraints"],
    ),
    ("quota.openshift.io", "v1", &["ClusterResourceQuota"]),
    (
        "network.openshift.io",
        "v1",
        &["ClusterNetwork", "EgressNetworkPolicy", "HostSubnet", "NetNamespace"],
    ),
    (
        "authorization.openshift.io",
        "v1",
        &[
            "ClusterRole",
            "ClusterRoleBinding",
            "Role",
            "RoleBinding",
            "RoleBindingRestriction",
        ],
    ),
    (
        "config.openshift.io",
        "v1",
        &["ClusterOperator", "ClusterVersion", "Infrastructure", "Network", "Proxy"],
    ),
    ("apiregistration.k8s.io", "v1", &["APIService"]),
    ("certificates.k8s.io", "v1", &["CertificateSigningRequest"]),
    ("node.k8s.io", "v1", &["RuntimeClass"]),
    ("events.k8s.io", "v1", &["Event"]),
    (
        "flowcontrol.apiserver.k8s.io",
        "v1",
        &["FlowSchema", "PriorityLevelConfiguration"],
    ),
    // Older versions still found in long-lived clusters
    (
        "extensions",
        "v1beta1",
        &[
            "DaemonSet",
            "Deployment",
            "Ingress",
            "NetworkPolicy",
            "PodSecurityPolicy",
            "ReplicaSet",
        ],
    ),
    ("apps", "v1beta1", &["ControllerRevision", "Deployment", "StatefulSet"]),
    (
        "apps",
        "v1beta2",
        &["ControllerRevision", "DaemonSet", "Deployment", "ReplicaSet", "StatefulSet"],
    ),
    ("batch", "v1beta1", &["CronJob"]),
    ("autoscaling", "v1", &["HorizontalPodAutoscaler"]),
    ("autoscaling", "v2beta1", &["HorizontalPodAutoscaler"]),
    ("autoscaling", "v2beta2", &["HorizontalPodAutoscaler"]),
    ("policy", "v1beta1", &["PodDisruptionBudget", "PodSecurityPolicy"]),
    (
        "rbac.authorization.k8s.io",
        "v1beta1",
        &["ClusterRole", "ClusterRoleBinding", "Role", "RoleBinding"],
    ),
    ("networking.k8s.io", "v1beta1", &["Ingress", "IngressClass"]),
    (
        "storage.k8s.io",
        "v1beta1",
        &["CSIDriver", "CSINode", "StorageClass", "VolumeAttachment"],
    ),
    ("coordination.k8s.io", "v1beta1", &["Lease"]),
    ("discovery.k8s.io", "v1beta1", &["EndpointSlice"]),
    ("scheduling.k8s.io", "v1beta1", &["PriorityClass"]),
    ("apiextensions.k8s.io", "v1beta1", &["CustomResourceDefinition"]),
    (
        "admissionregistration.k8s.io",
        "v1beta1",
        &["MutatingWebhookConfiguration", "ValidatingWebhookConfiguration"],
    ),
    ("apiregistration.k8s.io", "v1beta1", &["APIService"]),
    ("certificates.k8s.io", "v1beta1", &["CertificateSigningRequest"]),
    ("node.k8s.io", "v1beta1", &["RuntimeClass"]),
    ("events.k8s.io", "v1beta1", &["Event"]),
    (
        "flowcontrol.apiserver.k8s.io",
        "v1beta3",
        &["FlowSchema", "PriorityLevelConfiguration"],
    ),
];

/// Set of kinds the decoder accepts.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: HashSet<GroupVersionKind>,
}

impl Scheme {
    /// An empty scheme: nothing decodes until kinds are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheme with every built-in kind registered.
    pub fn builtin() -> Self {
        let mut scheme = Self::new();
        for (group, version, kinds) in BUILTIN_KINDS {
            for kind in *kinds {
                scheme.register(GroupVersionKind::new(*group, *version, *kind));
            }
        }
        scheme
    }

    /// Register a kind. Returns false if it was already known.
    pub fn register(&mut self, gvk: GroupVersionKind) -> bool {
        self.kinds.insert(gvk)
    }

    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.contains(gvk)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_version_splits_group() {
        let gvk = GroupVersionKind::from_api_version("apps/v1", "Deployment").unwrap();
        assert_eq!(gvk.group, "apps");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.api_version(), "apps/v1");

        let core = GroupVersionKind::from_api_version("v1", "ConfigMap").unwrap();
        assert_eq!(core.group, "");
        assert_eq!(core.api_version(), "v1");
    }

    #[test]
    fn test_from_api_version_rejects_empty_parts() {
        assert!(GroupVersionKind::from_api_version("", "Pod").is_err());
        assert!(GroupVersionKind::from_api_version("apps/", "Deployment").is_err());
        assert!(GroupVersionKind::from_api_version("/v1", "Deployment").is_err());
    }

    #[test]
    fn test_parse_kind_spec() {
        let gvk = GroupVersionKind::parse("example.com/v1alpha1/Widget").unwrap();
        assert_eq!(gvk, GroupVersionKind::new("example.com", "v1alpha1", "Widget"));

        let core = GroupVersionKind::parse("v1/Gadget").unwrap();
        assert_eq!(core, GroupVersionKind::new("", "v1", "Gadget"));

        assert!(GroupVersionKind::parse("Widget").is_err());
        assert!(GroupVersionKind::parse("a/b/c/Widget").is_err());
        assert!(GroupVersionKind::parse("v1/").is_err());
    }

    #[test]
    fn test_display() {
        let gvk = GroupVersionKind::new("apps", "v1", "Deployment");
        assert_eq!(gvk.to_string(), "apps/v1, Kind=Deployment");
    }

    #[test]
    fn test_builtin_scheme_recognizes_common_kinds() {
        let scheme = Scheme::builtin();
        assert!(scheme.recognizes(&GroupVersionKind::new("", "v1", "ConfigMap")));
        assert!(scheme.recognizes(&GroupVersionKind::new("apps", "v1", "Deployment")));
        assert!(scheme.recognizes(&GroupVersionKind::new("route.openshift.io", "v1", "Route")));
        assert!(!scheme.recognizes(&GroupVersionKind::new("", "v1", "Deployment")));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut scheme = Scheme::new();
        assert!(scheme.is_empty());
        assert!(scheme.register(GroupVersionKind::new("", "v1", "Pod")));
        assert!(!scheme.register(GroupVersionKind::new("", "v1", "Pod")));
        assert_eq!(scheme.len(), 1);
    }

    #[test]
    fn test_builtin_covers_older_versions_and_extra_groups() {
        let scheme = Scheme::builtin();
        for (group, version, kind) in [
            ("autoscaling", "v1", "HorizontalPodAutoscaler"),
            ("batch", "v1beta1", "CronJob"),
            ("extensions", "v1beta1", "Deployment"),
            ("apps", "v1beta2", "StatefulSet"),
            ("apiregistration.k8s.io", "v1", "APIService"),
            ("certificates.k8s.io", "v1", "CertificateSigningRequest"),
            ("node.k8s.io", "v1", "RuntimeClass"),
            ("authorization.openshift.io", "v1", "RoleBinding"),
        ] {
            assert!(
                scheme.recognizes(&GroupVersionKind::new(group, version, kind)),
                "{}/{} {}",
                group,
                version,
                kind
            );
        }
    }
}
