//! Built-in template payloads.
//!
//! Each producer kind maps to one template. Source templates start with
//! `{{ BOILERPLATE }}` so the license header lands at the top of every
//! generated Go file. The webhook template is the only one with gated
//! sections; they are declared in the fixed order defaulting, validation.
//!
//! Placeholders available to every template are listed in
//! `kubeforge_core::domain::entities::context`.

use kubeforge_core::domain::{
    Capability, DomainError, ProducerKind, ProjectVersion, TemplateBody,
};

// ── Public API ────────────────────────────────────────────────────────────────

/// Template for `kind` in a project of `version`.
///
/// # Errors
///
/// `TemplateError` if a built-in template declares the same section twice.
pub fn template_for(kind: ProducerKind, version: ProjectVersion) -> Result<TemplateBody, DomainError> {
    let name = kind.as_str();
    match (kind, version) {
        (ProducerKind::Types, _) => Ok(TemplateBody::new(name, TYPES)),
        (ProducerKind::Controller, ProjectVersion::V2) => Ok(TemplateBody::new(name, CONTROLLER_V2)),
        (ProducerKind::Controller, ProjectVersion::V1) => Ok(TemplateBody::new(name, CONTROLLER_V1)),
        (ProducerKind::Webhook, _) => TemplateBody::new(name, WEBHOOK)
            .with_section(Capability::Defaulting, WEBHOOK_DEFAULTING)?
            .with_section(Capability::Validation, WEBHOOK_VALIDATING),
        (ProducerKind::WebhookKustomization, _) => {
            Ok(TemplateBody::new(name, WEBHOOK_KUSTOMIZATION))
        }
        (ProducerKind::AddToScheme, _) => Ok(TemplateBody::new(name, ADD_TO_SCHEME)),
        (ProducerKind::AddController, _) => Ok(TemplateBody::new(name, ADD_CONTROLLER)),
    }
}

// ── API types ─────────────────────────────────────────────────────────────────

const TYPES: &str = r#"{{ BOILERPLATE }}

package {{ VERSION }}

import (
	metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"
)

// EDIT THIS FILE!  THIS IS SCAFFOLDING FOR YOU TO OWN!
// NOTE: json tags are required.  Any new fields you add must have json tags for the fields to be serialized.

// {{ KIND }}Spec defines the desired state of {{ KIND }}
type {{ KIND }}Spec struct {
	// INSERT ADDITIONAL SPEC FIELDS - desired state of cluster
	// Important: Run "make" to regenerate code after modifying this file
}

// {{ KIND }}Status defines the observed state of {{ KIND }}
type {{ KIND }}Status struct {
	// INSERT ADDITIONAL STATUS FIELD - define observed state of cluster
	// Important: Run "make" to regenerate code after modifying this file
}

// +kubebuilder:object:root=true
// +kubebuilder:resource:path={{ PLURAL }}

// {{ KIND }} is the Schema for the {{ PLURAL }} API
type {{ KIND }} struct {
	metav1.TypeMeta   `json:",inline"`
	metav1.ObjectMeta `json:"metadata,omitempty"`

	Spec   {{ KIND }}Spec   `json:"spec,omitempty"`
	Status {{ KIND }}Status `json:"status,omitempty"`
}

// +kubebuilder:object:root=true

// {{ KIND }}List contains a list of {{ KIND }}
type {{ KIND }}List struct {
	metav1.TypeMeta `json:",inline"`
	metav1.ListMeta `json:"metadata,omitempty"`
	Items           []{{ KIND }} `json:"items"`
}

func init() {
	SchemeBuilder.Register(&{{ KIND }}{}, &{{ KIND }}List{})
}
"#;

// ── Controllers ───────────────────────────────────────────────────────────────

const CONTROLLER_V2: &str = r#"{{ BOILERPLATE }}

package controllers

import (
	"context"

	"github.com/go-logr/logr"
	"k8s.io/apimachinery/pkg/runtime"
	ctrl "sigs.k8s.io/controller-runtime"
	"sigs.k8s.io/controller-runtime/pkg/client"

	{{ IMPORT_ALIAS }} "{{ PACKAGE_PATH }}"
)

// {{ KIND }}Reconciler reconciles a {{ KIND }} object
type {{ KIND }}Reconciler struct {
	client.Client
	Log    logr.Logger
	Scheme *runtime.Scheme
}

// +kubebuilder:rbac:groups={{ GROUP_DOMAIN }},resources={{ PLURAL }},verbs=get;list;watch;create;update;patch;delete
// +kubebuilder:rbac:groups={{ GROUP_DOMAIN }},resources={{ PLURAL }}/status,verbs=get;update;patch

func (r *{{ KIND }}Reconciler) Reconcile(req ctrl.Request) (ctrl.Result, error) {
	_ = context.Background()
	_ = r.Log.WithValues("{{ KIND_LOWER }}", req.NamespacedName)

	// your logic here

	return ctrl.Result{}, nil
}

func (r *{{ KIND }}Reconciler) SetupWithManager(mgr ctrl.Manager) error {
	return ctrl.NewControllerManagedBy(mgr).
		For(&{{ IMPORT_ALIAS }}.{{ KIND }}{}).
		Complete(r)
}
"#;

const CONTROLLER_V1: &str = r#"{{ BOILERPLATE }}

package {{ KIND_LOWER }}

import (
	"context"

	"k8s.io/apimachinery/pkg/api/errors"
	"k8s.io/apimachinery/pkg/runtime"
	"sigs.k8s.io/controller-runtime/pkg/builder"
	"sigs.k8s.io/controller-runtime/pkg/client"
	"sigs.k8s.io/controller-runtime/pkg/manager"
	"sigs.k8s.io/controller-runtime/pkg/reconcile"
	{{ IMPORT_ALIAS }} "{{ PACKAGE_PATH }}"
)

// Add creates a new {{ KIND }} Controller and adds it to the Manager. The Manager will set fields on the Controller
// and Start it when the Manager is Started.
func Add(mgr manager.Manager) error {
	return add(mgr, newReconciler(mgr))
}

// newReconciler returns a new reconcile.Reconciler
func newReconciler(mgr manager.Manager) reconcile.Reconciler {
	return &Reconcile{{ KIND }}{Client: mgr.GetClient(), scheme: mgr.GetScheme()}
}

// add adds a new Controller to mgr with r as the reconcile.Reconciler
func add(mgr manager.Manager, r reconcile.Reconciler) error {
	return builder.ControllerManagedBy(mgr).
		For(&{{ IMPORT_ALIAS }}.{{ KIND }}{}).
		Complete(r)
}

var _ reconcile.Reconciler = &Reconcile{{ KIND }}{}

// Reconcile{{ KIND }} reconciles a {{ KIND }} object
type Reconcile{{ KIND }} struct {
	client.Client
	scheme *runtime.Scheme
}

// Reconcile reads that state of the cluster for a {{ KIND }} object and makes changes based on the state read
// and what is in the {{ KIND }}.Spec
// +kubebuilder:rbac:groups={{ GROUP_DOMAIN }},resources={{ PLURAL }},verbs=get;list;watch;create;update;patch;delete
// +kubebuilder:rbac:groups={{ GROUP_DOMAIN }},resources={{ PLURAL }}/status,verbs=get;update;patch
func (r *Reconcile{{ KIND }}) Reconcile(request reconcile.Request) (reconcile.Result, error) {
	instance := &{{ IMPORT_ALIAS }}.{{ KIND }}{}
	err := r.Get(context.TODO(), request.NamespacedName, instance)
	if err != nil {
		if errors.IsNotFound(err) {
			// Object not found, return.  Created objects are automatically garbage collected.
			return reconcile.Result{}, nil
		}
		// Error reading the object - requeue the request.
		return reconcile.Result{}, err
	}

	return reconcile.Result{}, nil
}
"#;

// ── Webhooks ──────────────────────────────────────────────────────────────────

const WEBHOOK: &str = r#"{{ BOILERPLATE }}

package {{ VERSION }}

import (
	"k8s.io/apimachinery/pkg/runtime"
	ctrl "sigs.k8s.io/controller-runtime"
	logf "sigs.k8s.io/controller-runtime/pkg/runtime/log"
	"sigs.k8s.io/controller-runtime/pkg/webhook"
)

// log is for logging in this package.
var {{ KIND_LOWER }}log = logf.Log.WithName("{{ KIND_LOWER }}-resource")

func (r *{{ KIND }}) SetupWebhookWithManager(mgr ctrl.Manager) error {
	return ctrl.NewWebhookManagedBy(mgr).
		For(r).
		Complete()
}

// EDIT THIS FILE!  THIS IS SCAFFOLDING FOR YOU TO OWN!
"#;

const WEBHOOK_DEFAULTING: &str = r#"
// +kubebuilder:webhook:path={{ MUTATING_PATH }},mutating=true,failurePolicy=fail,groups={{ GROUP_DOMAIN }},resources={{ PLURAL }},verbs=create;update,versions={{ VERSION }},name=m{{ KIND_LOWER }}.kb.io

var _ webhook.Defaulter = &{{ KIND }}{}

// Default implements webhook.Defaulter so a webhook will be registered for the type
func (r *{{ KIND }}) Default() {
	{{ KIND_LOWER }}log.Info("default", "name", r.Name)

	// TODO(user): fill in your defaulting logic.
}
"#;

const WEBHOOK_VALIDATING: &str = r#"
// +kubebuilder:webhook:path={{ VALIDATING_PATH }},mutating=false,failurePolicy=fail,groups={{ GROUP_DOMAIN }},resources={{ PLURAL }},verbs=create;update,versions={{ VERSION }},name=v{{ KIND_LOWER }}.kb.io

var _ webhook.Validator = &{{ KIND }}{}

// ValidateCreate implements webhook.Validator so a webhook will be registered for the type
func (r *{{ KIND }}) ValidateCreate() error {
	{{ KIND_LOWER }}log.Info("validate create", "name", r.Name)

	// TODO(user): fill in your validation logic upon object creation.
	return nil
}

// ValidateUpdate implements webhook.Validator so a webhook will be registered for the type
func (r *{{ KIND }}) ValidateUpdate(old runtime.Object) error {
	{{ KIND_LOWER }}log.Info("validate update", "name", r.Name)

	// TODO(user): fill in your validation logic upon object update.
	return nil
}
"#;

const WEBHOOK_KUSTOMIZATION: &str = r#"resources:
- manifests.yaml
- service.yaml

configurations:
- kustomizeconfig.yaml
"#;

// ── Version 1 registration files ──────────────────────────────────────────────

const ADD_TO_SCHEME: &str = r#"{{ BOILERPLATE }}

package apis

import (
	{{ IMPORT_ALIAS }} "{{ PACKAGE_PATH }}"
)

func init() {
	// Register the types with the Scheme so the components can map objects to GroupVersionKinds and back
	AddToSchemes = append(AddToSchemes, {{ IMPORT_ALIAS }}.SchemeBuilder.AddToScheme)
}
"#;

const ADD_CONTROLLER: &str = r#"{{ BOILERPLATE }}

package controller

import (
	"{{ REPO }}/pkg/controller/{{ KIND_LOWER }}"
)

func init() {
	// AddToManagerFuncs is a list of functions to create controllers and add them to a manager.
	AddToManagerFuncs = append(AddToManagerFuncs, {{ KIND_LOWER }}.Add)
}
"#;
