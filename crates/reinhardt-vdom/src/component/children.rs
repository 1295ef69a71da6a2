//! Conversion of builder arguments into child descriptors.

use std::borrow::Cow;

use super::VNode;

/// Anything that can be appended as children of a descriptor.
///
/// Strings and numbers become text nodes. `bool` and `None` contribute
/// nothing, which makes `cond.then(|| ...)` and `flag && ...`-style children
/// work. Vectors, arrays and tuples are flattened one level.
pub trait IntoChildren {
	/// Appends the converted children to `out`.
	fn push_into(self, out: &mut Vec<VNode>);

	/// Collects into a vector.
	fn into_children(self) -> Vec<VNode>
	where
		Self: Sized,
	{
		let mut out = Vec::new();
		self.push_into(&mut out);
		out
	}
}

impl IntoChildren for VNode {
	fn push_into(self, out: &mut Vec<VNode>) {
		out.push(self);
	}
}

impl IntoChildren for () {
	fn push_into(self, _out: &mut Vec<VNode>) {}
}

impl IntoChildren for bool {
	fn push_into(self, _out: &mut Vec<VNode>) {}
}

impl IntoChildren for &'static str {
	fn push_into(self, out: &mut Vec<VNode>) {
		out.push(VNode::text(self));
	}
}

impl IntoChildren for String {
	fn push_into(self, out: &mut Vec<VNode>) {
		out.push(VNode::text(self));
	}
}

impl IntoChildren for Cow<'static, str> {
	fn push_into(self, out: &mut Vec<VNode>) {
		out.push(VNode::text(self));
	}
}

macro_rules! numeric_children {
	($($t:ty),*) => {
		$(
			impl IntoChildren for $t {
				fn push_into(self, out: &mut Vec<VNode>) {
					out.push(VNode::text(self.to_string()));
				}
			}
		)*
	};
}

numeric_children!(i32, i64, u32, u64, usize, f32, f64);

impl<T: IntoChildren> IntoChildren for Option<T> {
	fn push_into(self, out: &mut Vec<VNode>) {
		if let Some(inner) = self {
			inner.push_into(out);
		}
	}
}

impl<T: IntoChildren> IntoChildren for Vec<T> {
	fn push_into(self, out: &mut Vec<VNode>) {
		for item in self {
			item.push_into(out);
		}
	}
}

impl<T: IntoChildren, const N: usize> IntoChildren for [T; N] {
	fn push_into(self, out: &mut Vec<VNode>) {
		for item in self {
			item.push_into(out);
		}
	}
}

macro_rules! tuple_children {
	($($name:ident),+) => {
		impl<$($name: IntoChildren),+> IntoChildren for ($($name,)+) {
			#[allow(non_snake_case)]
			fn push_into(self, out: &mut Vec<VNode>) {
				let ($($name,)+) = self;
				$($name.push_into(out);)+
			}
		}
	};
}

tuple_children!(A);
tuple_children!(A, B);
tuple_children!(A, B, C);
tuple_children!(A, B, C, D);
tuple_children!(A, B, C, D, E);
tuple_children!(A, B, C, D, E, F);
tuple_children!(A, B, C, D, E, F, G);
tuple_children!(A, B, C, D, E, F, G, H);
