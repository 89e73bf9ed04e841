//! Snapshot tests for complete generated files.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use kew_dump::{Config, Session};
use kew_value::{Kind, Method, Methods, Pointer, Type, Value};

const CORE: &str = "k8s.io/api/core/v1";
const RESOURCE: &str = "k8s.io/apimachinery/pkg/api/resource";

fn marshal_quantity(value: &Value) -> Option<String> {
    value.field("s").and_then(Value::as_str).map(kew_core::quote)
}

fn quantity(text: &str) -> Value {
    let ty = Type::named(Kind::Struct, "resource.Quantity", RESOURCE)
        .with_methods(Methods::new().with_marshal_json(Method::on_value(marshal_quantity)));
    Value::structure(ty, [("s", Value::string(text))])
}

fn container(name: &str, cpu: &str) -> Value {
    let resource_name = Type::named(Kind::String, "v1.ResourceName", CORE);
    let quantity_ty = quantity("").ty().clone();
    let resource_list = Type::named(Kind::Map, "v1.ResourceList", CORE)
        .with_key(resource_name.clone())
        .with_elem(quantity_ty);
    let limits = Value::map_typed(
        resource_list,
        vec![(Value::string_typed(resource_name, "cpu"), quantity(cpu))],
    );
    Value::structure(
        Type::named(Kind::Struct, "v1.Container", CORE),
        [
            ("Name", Value::string(name)),
            ("Image", Value::string("")),
            ("Limits", limits),
        ],
    )
}

fn pod() -> Value {
    let container_ty = Type::named(Kind::Struct, "v1.Container", CORE);
    let spec = Value::structure(
        Type::named(Kind::Struct, "v1.PodSpec", CORE),
        [
            (
                "Containers",
                Value::slice(container_ty, vec![container("web", "500m")]),
            ),
            (
                "Priority",
                Value::pointer(&Pointer::new(Value::int_typed(Type::basic(Kind::Int32), 10))),
            ),
        ],
    );
    let pod = Value::structure(
        Type::named(Kind::Struct, "v1.Pod", CORE),
        [("Spec", spec)],
    );
    Value::pointer(&Pointer::new(pod))
}

fn document() -> Value {
    let boxed = Value::interface;
    let tags = Value::slice(
        Type::interface(),
        vec![boxed(Value::string("a")), Value::nil_interface()],
    );
    Value::map(
        Type::string(),
        Type::interface(),
        vec![
            (Value::string("replicas"), boxed(Value::float64(2.0))),
            (Value::string("name"), boxed(Value::string("web"))),
            (Value::string("ratio"), boxed(Value::float64(0.5))),
            (Value::string("tags"), boxed(tags)),
            (Value::string("count"), boxed(Value::int(3))),
            (Value::string("script"), boxed(Value::string("echo hi\nexit 0\n"))),
        ],
    )
}

#[test]
fn test_pod_with_quantities() {
    let output = Session::new(Config::new("k8s")).render(&[pod()]);
    insta::assert_snapshot!("pod_with_quantities", output.text);
}

#[test]
fn test_sorted_document() {
    let config = Config::new("fixtures").with_sort_keys(true);
    let output = Session::new(config).render(&[document()]);
    insta::assert_snapshot!("sorted_document", output.text);
}
